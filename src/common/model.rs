pub mod health;

use alloc::borrow::Cow;

use http::StatusCode;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

pub struct GenericError {
    pub status: ApiStatus,
    pub code: Option<StatusCode>,
    pub error: Option<Cow<'static, str>>,
    pub message: Option<Cow<'static, str>>,
}

impl Serialize for GenericError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let field_count = 1 // status 总是存在
            + self.code.is_some() as usize
            + self.error.is_some() as usize
            + self.message.is_some() as usize;

        let mut state = serializer.serialize_struct("GenericError", field_count)?;

        state.serialize_field("status", &self.status)?;

        if let Some(ref code) = self.code {
            state.serialize_field("code", &code.as_u16())?;
        }

        if let Some(ref error) = self.error {
            state.serialize_field("error", error)?;
        }

        if let Some(ref message) = self.message {
            state.serialize_field("message", message)?;
        }

        state.end()
    }
}
