// Copyright 2026 The Vault Admin Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The errors reported when starting or observing vault operations.

mod status;
pub use status::Status;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The core error returned by the vault administration client libraries.
///
/// Errors come from multiple sources. The service may report that an operation
/// could not be started, the transport may be unable to reach the service, or
/// the application may call a function when the operation is not in a state
/// that supports it.
///
/// Most applications just return or log the error. Applications that need to
/// interrogate the details can use the predicates to determine the error kind,
/// and the [source][std::error::Error::source] chain for deeper information.
///
/// # Example
/// ```
/// use vault_admin_common::error::{Error, Status};
/// match example_function() {
///     Err(e) if e.status().is_some() => {
///         println!("service error {e}, debug using {:?}", e.status().unwrap());
///     }
///     Err(e) => { println!("some other error {e}"); }
///     Ok(_) => { println!("success, how boring"); }
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::service(Status::default().set_code("Forbidden").set_message("access denied")))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error with the information reported by the vault service.
    ///
    /// # Example
    /// ```
    /// use vault_admin_common::error::{Error, Status};
    /// let status = Status::default().set_code("BackupFailed").set_message("the backup failed");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        Self {
            kind: ErrorKind::Service(status),
            source: None,
        }
    }

    /// If the error was reported by the service, returns the status payload.
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(status) => Some(status),
            _ => None,
        }
    }

    /// Creates an error representing a transport problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use vault_admin_common::error::Error;
    /// let error = Error::io("simulated connection reset");
    /// assert!(error.is_io());
    /// assert!(error.source().is_some());
    /// ```
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Io,
            source: Some(source.into()),
        }
    }

    /// The request could not reach the service, or the connection was dropped
    /// before a response arrived. The request may or may not have started on
    /// the service side.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io)
    }

    /// Creates an error representing a deserialization problem.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response was received but could not be interpreted. This is always
    /// a client-side generated error.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error for calls made while the operation is not in a state
    /// that supports them.
    ///
    /// # Example
    /// ```
    /// use vault_admin_common::error::Error;
    /// let error = Error::invalid_state("the operation has not completed yet");
    /// assert!(error.is_invalid_state());
    /// ```
    pub fn invalid_state<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::InvalidState,
            source: Some(source.into()),
        }
    }

    /// A precondition on the local operation state does not hold. These errors
    /// are generated before any remote interaction takes place.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidState)
    }

    /// Creates an error for calls the operation flavor does not support.
    ///
    /// # Example
    /// ```
    /// use vault_admin_common::error::Error;
    /// let error = Error::unsupported("backup operations do not support cancellation");
    /// assert!(error.is_unsupported());
    /// ```
    pub fn unsupported<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            source: Some(source.into()),
        }
    }

    /// The call is not part of the remote protocol for this operation flavor.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ErrorKind::Unsupported)
    }

    /// Creates an error that does not fit any of the other categories.
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Other,
            source: Some(source.into()),
        }
    }

    /// The error does not fit any of the other categories.
    pub fn is_other(&self) -> bool {
        matches!(self.kind, ErrorKind::Other)
    }
}

#[derive(Debug)]
enum ErrorKind {
    Service(Status),
    Io,
    Deserialization,
    InvalidState,
    Unsupported,
    Other,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Service(status) => write!(f, "the service reported an error: {status}"),
            ErrorKind::Io => write!(f, "the transport reported an error"),
            ErrorKind::Deserialization => write!(f, "cannot deserialize the response"),
            ErrorKind::InvalidState => {
                write!(f, "the operation is not in a state that supports this call")
            }
            ErrorKind::Unsupported => {
                write!(f, "the operation flavor does not support this call")
            }
            ErrorKind::Other => write!(f, "an error occurred in the client library"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}
