//! Variadic log arguments.
//!
//! Leveled calls take an ordered slice of [`LogValue`]s. Each variant has one
//! canonical rendering and the message is those renderings joined by a
//! single space.

use std::fmt;

/// A single argument to a leveled log call.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Text, rendered verbatim.
    Str(Box<str>),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point, rendered with Rust's shortest round-trip form.
    Float(f64),
    /// Boolean, rendered as `true` / `false`.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Absent value, rendered as `<nil>`.
    Nil,
}

impl LogValue {
    /// Capture any `Display` value as text.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Str(value.to_string().into_boxed_str())
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => formatter.write_str(value),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::UInt(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Char(value) => write!(formatter, "{value}"),
            Self::Nil => formatter.write_str("<nil>"),
        }
    }
}

/// Build the message text for a leveled call.
#[must_use]
pub fn join_values(values: &[LogValue]) -> String {
    let mut message = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            message.push(' ');
        }
        message.push_str(&value.to_string());
    }
    message
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        Self::Str(value.as_str().into())
    }
}

impl From<Box<str>> for LogValue {
    fn from(value: Box<str>) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for LogValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for LogValue {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::display(&value), Self::Int)
    }
}

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::display(&value), Self::UInt)
    }
}

impl<T: Into<Self>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_separates_values_with_single_spaces() {
        let values = [
            LogValue::from("starting"),
            LogValue::from("v1"),
            LogValue::from(3_u8),
            LogValue::from(-2_i32),
            LogValue::from(true),
        ];
        assert_eq!(join_values(&values), "starting v1 3 -2 true");
        assert_eq!(join_values(&[]), "");
    }

    #[test]
    fn options_and_display_values_render_canonically() {
        let missing: Option<&str> = None;
        assert_eq!(LogValue::from(missing).to_string(), "<nil>");
        assert_eq!(LogValue::from(Some(1.5_f64)).to_string(), "1.5");
        assert_eq!(LogValue::display(&'x').to_string(), "x");
        assert_eq!(LogValue::from(usize::MAX).to_string(), usize::MAX.to_string());
    }
}
