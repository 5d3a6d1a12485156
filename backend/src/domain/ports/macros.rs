//! Helper macro for generating port error enums.
//!
//! Each variant gets a `snake_case` constructor accepting `impl Into<T>` for
//! every field, so adapters can write `TransportError::timeout(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $name:ident $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $name:ident $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $name $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $name
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
                $variant $( {
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported by the adapter.")]
                        $field : $ty
                    ),*
                } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $name $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum SamplePortError {
            Refused { message: String } => "refused: {message}",
            Retries { count: u32 } => "retries: {count}",
            Both { message: String, count: u32 } => "both: {message} ({count})",
            Closed => "closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::refused("connection reset");
        assert_eq!(err.to_string(), "refused: connection reset");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        assert_eq!(SamplePortError::retries(3_u32).to_string(), "retries: 3");
    }

    #[test]
    fn constructors_support_mixed_and_unit_variants() {
        assert_eq!(
            SamplePortError::both("slow", 2_u32).to_string(),
            "both: slow (2)"
        );
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }
}
