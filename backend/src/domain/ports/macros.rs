//! `define_port_error!`: port error enums that know their API error code.
//!
//! Each variant names the [`crate::domain::Error`] constructor it maps to,
//! so services can `?` adapter failures straight into API errors. An
//! unreachable backend is `service_unavailable`; everything else picks the
//! code that matches what the caller can do about it.
//!
//! ```ignore
//! define_port_error! {
//!     /// Errors raised by leave repository adapters.
//!     pub enum LeaveRepositoryError {
//!         /// The backend could not be reached.
//!         Connection { message: String } =>
//!             service_unavailable("leave repository unavailable: {message}"),
//!     }
//! }
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $code:ident($message:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                let message = error.to_string();
                match error {
                    $( $name::$variant { .. } => Self::$code(message), )+
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum WardFeedError {
            Connection { message: String } => service_unavailable("ward feed unavailable: {message}"),
            UnknownWard { ward: String } => invalid_request("unknown ward: {ward}"),
            MissingBed { bed: u16 } => not_found("bed {bed} not found"),
            Partial { message: String, inserted: usize } => internal("{message} after {inserted} rows"),
        }
    }

    #[rstest]
    #[case(WardFeedError::connection("timeout"), ErrorCode::ServiceUnavailable, "ward feed unavailable: timeout")]
    #[case(WardFeedError::unknown_ward("Burns Unit"), ErrorCode::InvalidRequest, "unknown ward: Burns Unit")]
    #[case(WardFeedError::missing_bed(12_u16), ErrorCode::NotFound, "bed 12 not found")]
    #[case(WardFeedError::partial("insert failed", 2_usize), ErrorCode::InternalError, "insert failed after 2 rows")]
    fn variants_map_to_their_api_codes(
        #[case] failure: WardFeedError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        assert_eq!(failure.to_string(), message);
        let error = Error::from(failure);
        assert_eq!(error.code(), code);
        assert_eq!(error.message(), message);
    }

    #[test]
    fn question_mark_converts_port_failures() {
        fn read() -> Result<(), WardFeedError> {
            Err(WardFeedError::connection("refused"))
        }
        fn service() -> Result<(), Error> {
            read()?;
            Ok(())
        }
        let error = service().expect_err("feed is down");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
