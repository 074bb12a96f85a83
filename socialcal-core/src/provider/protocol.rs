//! JSON protocol spoken with external provider binaries over stdin/stdout.
//!
//! One request line goes in, one response line comes out:
//!
//! ```text
//! {"command":"list_birthdays","params":{"table":"birthdays"}}
//! {"status":"success","data":[{"id":"..","name":"..","handle":"..","monthIndex":0,"dayIndex":1}]}
//! ```

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::birthday::{Birthday, NewBirthday};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListBirthdays,
    CreateBirthday,
    DeleteBirthday,
    DeleteAll,
}

/// Request sent to the provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Fetch every stored birthday.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListBirthdays {
    #[serde(flatten)]
    pub provider_params: serde_json::Map<String, serde_json::Value>,
}

impl ProviderCommand for ListBirthdays {
    type Response = Vec<Birthday>;
    fn command() -> Command {
        Command::ListBirthdays
    }
}

/// Insert a birthday; the provider assigns and returns the id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBirthday {
    #[serde(flatten)]
    pub provider_params: serde_json::Map<String, serde_json::Value>,
    pub birthday: NewBirthday,
}

impl ProviderCommand for CreateBirthday {
    type Response = Birthday;
    fn command() -> Command {
        Command::CreateBirthday
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteBirthday {
    #[serde(flatten)]
    pub provider_params: serde_json::Map<String, serde_json::Value>,
    pub id: String,
}

impl ProviderCommand for DeleteBirthday {
    type Response = ();
    fn command() -> Command {
        Command::DeleteBirthday
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAll {
    #[serde(flatten)]
    pub provider_params: serde_json::Map<String, serde_json::Value>,
}

impl ProviderCommand for DeleteAll {
    type Response = ();
    fn command() -> Command {
        Command::DeleteAll
    }
}
