//! Helper macro generating port error enums with snake_case constructors.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Unit => "unit",
            Message { message: String } => "message: {message}",
            Status { status: u16, message: String } => "status {status}: {message}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExamplePortError::unit().to_string(), "unit");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::message("hello");
        assert_eq!(err.to_string(), "message: hello");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::status(404_u16, "missing");
        assert_eq!(err.to_string(), "status 404: missing");
    }
}
