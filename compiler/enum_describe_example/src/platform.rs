//! Enums that only exist on some targets.

use std::borrow::Cow;

use enum_describe_macros::GenerateEnumDescription;

use crate::EnumDescription;

#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, GenerateEnumDescription)]
pub enum PathStyle {
    #[description("Forward slashes")]
    Posix,
}

#[cfg(not(unix))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, GenerateEnumDescription)]
pub enum PathStyle {
    #[description("Backslashes")]
    Dos,
}

/// Never compiled, so no lookup may be compiled for it either.
#[cfg(any())]
#[derive(Debug, GenerateEnumDescription)]
pub enum Unbuilt {
    Nothing,
}

#[cfg(any())]
pub mod unbuilt {
    #[derive(Debug, enum_describe_macros::GenerateEnumDescription)]
    pub enum InsideUnbuilt {
        Nothing,
    }
}

/// Visible up to the crate root, which is where the lookups live.
#[derive(Debug, Clone, Copy, GenerateEnumDescription)]
pub(super) enum Separator {
    #[description("Slash")]
    Slash,
    #[description("Backslash")]
    Backslash,
}

impl Separator {
    fn native() -> Self {
        if cfg!(windows) {
            Separator::Backslash
        } else {
            Separator::Slash
        }
    }
}

/// Description of the path separator of the current target.
pub fn native_separator() -> Cow<'static, str> {
    Separator::native().description()
}
