//! Parser configuration
//!
//! `Options` collects everything a single parse invocation can be
//! configured with: the language version (required), source type,
//! contextual relaxations for embedding/REPL use, position attachment,
//! and the observation hooks. Hooks are observation-only: they can
//! never abort or alter the parse.

use serde::Serialize;

use crate::position::Position;
use crate::token::{Comment, Token};

/// Supported language-version profiles, ordered so feature gates are
/// plain `>=` comparisons on one authoritative value per parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EcmaVersion {
    Es3,
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
    Es2025,
    Latest,
}

impl EcmaVersion {
    /// Accepts either edition numbers (3, 5, 6..16) or years (2015..).
    pub fn from_number(n: u32) -> Option<Self> {
        let version = match n {
            3 => Self::Es3,
            5 => Self::Es5,
            6 | 2015 => Self::Es2015,
            7 | 2016 => Self::Es2016,
            8 | 2017 => Self::Es2017,
            9 | 2018 => Self::Es2018,
            10 | 2019 => Self::Es2019,
            11 | 2020 => Self::Es2020,
            12 | 2021 => Self::Es2021,
            13 | 2022 => Self::Es2022,
            14 | 2023 => Self::Es2023,
            15 | 2024 => Self::Es2024,
            16 | 2025 => Self::Es2025,
            _ => return None,
        };
        Some(version)
    }

    /// Name used in version-gate error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Es3 => "ES3",
            Self::Es5 => "ES5",
            Self::Es2015 => "ES2015",
            Self::Es2016 => "ES2016",
            Self::Es2017 => "ES2017",
            Self::Es2018 => "ES2018",
            Self::Es2019 => "ES2019",
            Self::Es2020 => "ES2020",
            Self::Es2021 => "ES2021",
            Self::Es2022 => "ES2022",
            Self::Es2023 => "ES2023",
            Self::Es2024 => "ES2024",
            Self::Es2025 => "ES2025",
            Self::Latest => "latest",
        }
    }
}

/// Whether the input is parsed as a classic script or a module.
/// Modules enable import/export and are strict by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// Reserved-word policy for identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowReserved {
    /// Version default: permissive below ES5, checking at/above.
    #[default]
    Auto,
    /// Permit reserved words as identifiers everywhere the grammar can.
    Yes,
    /// Reject reserved words even where normally allowed.
    Never,
}

pub type TokenHook = Box<dyn FnMut(&Token)>;
pub type CommentHook = Box<dyn FnMut(&Comment)>;
/// Receives the offset (and location, when enabled) of each semicolon
/// the parser inserted via ASI.
pub type PositionHook = Box<dyn FnMut(usize, Option<Position>)>;

pub struct Options {
    /// Required; parsing fails before any token is read when missing.
    pub ecma_version: Option<EcmaVersion>,
    pub source_type: SourceType,
    pub allow_reserved: AllowReserved,
    pub allow_return_outside_function: bool,
    pub allow_import_export_everywhere: bool,
    pub allow_await_outside_function: bool,
    pub allow_super_outside_method: bool,
    /// Accept a leading `#!` line. Defaults to on for ES2023+.
    pub allow_hash_bang: Option<bool>,
    /// Attach `loc: {start, end}` line/column pairs to nodes and tokens.
    pub locations: bool,
    /// Attach `range: [start, end]` offset pairs to nodes.
    pub ranges: bool,
    /// Retain ParenthesizedExpression wrapper nodes instead of unwrapping.
    pub preserve_parens: bool,
    /// Recorded in `loc.source`; no semantic effect.
    pub source_file: Option<String>,
    /// Attached verbatim to every node as `sourceFile`; no semantic effect.
    pub direct_source_file: Option<String>,
    pub on_token: Option<TokenHook>,
    pub on_comment: Option<CommentHook>,
    pub on_inserted_semicolon: Option<PositionHook>,
    pub on_trailing_comma: Option<PositionHook>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ecma_version: None,
            source_type: SourceType::Script,
            allow_reserved: AllowReserved::Auto,
            allow_return_outside_function: false,
            allow_import_export_everywhere: false,
            allow_await_outside_function: false,
            allow_super_outside_method: false,
            allow_hash_bang: None,
            locations: false,
            ranges: false,
            preserve_parens: false,
            source_file: None,
            direct_source_file: None,
            on_token: None,
            on_comment: None,
            on_inserted_semicolon: None,
            on_trailing_comma: None,
        }
    }
}

impl Options {
    pub fn new(ecma_version: EcmaVersion) -> Self {
        Self {
            ecma_version: Some(ecma_version),
            ..Self::default()
        }
    }

    pub fn module(mut self) -> Self {
        self.source_type = SourceType::Module;
        self
    }

    pub fn with_locations(mut self) -> Self {
        self.locations = true;
        self
    }

    pub fn with_ranges(mut self) -> Self {
        self.ranges = true;
        self
    }

    pub fn with_preserve_parens(mut self) -> Self {
        self.preserve_parens = true;
        self
    }

    pub fn with_on_token(mut self, hook: TokenHook) -> Self {
        self.on_token = Some(hook);
        self
    }

    pub fn with_on_comment(mut self, hook: CommentHook) -> Self {
        self.on_comment = Some(hook);
        self
    }

    pub fn with_on_inserted_semicolon(mut self, hook: PositionHook) -> Self {
        self.on_inserted_semicolon = Some(hook);
        self
    }

    pub fn with_on_trailing_comma(mut self, hook: PositionHook) -> Self {
        self.on_trailing_comma = Some(hook);
        self
    }

    /// Resolved hash-bang policy for the configured version.
    pub fn hash_bang_allowed(&self) -> bool {
        match self.allow_hash_bang {
            Some(explicit) => explicit,
            None => self
                .ecma_version
                .is_some_and(|v| v >= EcmaVersion::Es2023),
        }
    }
}
