//! Result types of well-known library functions and methods.
//!
//! Only functions that produce loggers or strings are listed. Anything else
//! returns values of unknown type, which keeps resolution conservative.

use logmsglint_core::{StaticType, SLOG_PACKAGE, ZAP_PACKAGE};

/// Shape of a well-known result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Known {
    /// `*zap.Logger`
    ZapLogger,
    /// `*zap.SugaredLogger`
    ZapSugared,
    /// `zap.Config`
    ZapConfig,
    /// `*slog.Logger`
    SlogLogger,
    /// `string`
    Str,
    /// `error`
    Error,
}

impl Known {
    /// The static type this shape stands for.
    #[must_use]
    pub fn static_type(self) -> StaticType {
        match self {
            Self::ZapLogger => pointer_to(ZAP_PACKAGE, "Logger"),
            Self::ZapSugared => pointer_to(ZAP_PACKAGE, "SugaredLogger"),
            Self::ZapConfig => external(ZAP_PACKAGE, "Config"),
            Self::SlogLogger => pointer_to(SLOG_PACKAGE, "Logger"),
            Self::Str => StaticType::String,
            Self::Error => StaticType::Other("error".to_string()),
        }
    }
}

/// A named type declared in another package. Its underlying type is not
/// known to a single-file front end.
#[must_use]
pub fn external(package: &str, name: &str) -> StaticType {
    StaticType::Named {
        package: package.to_string(),
        name: name.to_string(),
        underlying: Box::new(StaticType::Other(String::new())),
    }
}

fn pointer_to(package: &str, name: &str) -> StaticType {
    StaticType::Pointer(Box::new(external(package, name)))
}

use Known::{Error, SlogLogger, Str, ZapConfig, ZapLogger, ZapSugared};

/// Package-level functions: `(package path, name, results)`.
const FUNCTIONS: &[(&str, &str, &[Known])] = &[
    (ZAP_PACKAGE, "NewNop", &[ZapLogger]),
    (ZAP_PACKAGE, "NewProduction", &[ZapLogger, Error]),
    (ZAP_PACKAGE, "NewDevelopment", &[ZapLogger, Error]),
    (ZAP_PACKAGE, "NewExample", &[ZapLogger]),
    (ZAP_PACKAGE, "New", &[ZapLogger]),
    (ZAP_PACKAGE, "L", &[ZapLogger]),
    (ZAP_PACKAGE, "Must", &[ZapLogger]),
    (ZAP_PACKAGE, "S", &[ZapSugared]),
    (ZAP_PACKAGE, "NewProductionConfig", &[ZapConfig]),
    (ZAP_PACKAGE, "NewDevelopmentConfig", &[ZapConfig]),
    (SLOG_PACKAGE, "Default", &[SlogLogger]),
    (SLOG_PACKAGE, "New", &[SlogLogger]),
    ("fmt", "Sprint", &[Str]),
    ("fmt", "Sprintf", &[Str]),
    ("fmt", "Sprintln", &[Str]),
    ("strings", "Join", &[Str]),
    ("strings", "Repeat", &[Str]),
    ("strings", "ReplaceAll", &[Str]),
    ("strings", "ToLower", &[Str]),
    ("strings", "ToUpper", &[Str]),
    ("strings", "TrimSpace", &[Str]),
    ("strconv", "Itoa", &[Str]),
    ("strconv", "Quote", &[Str]),
];

/// Methods: `(package path, receiver type name, method, results)`.
const METHODS: &[(&str, &str, &str, &[Known])] = &[
    (ZAP_PACKAGE, "Logger", "Sugar", &[ZapSugared]),
    (ZAP_PACKAGE, "Logger", "With", &[ZapLogger]),
    (ZAP_PACKAGE, "Logger", "Named", &[ZapLogger]),
    (ZAP_PACKAGE, "Logger", "WithOptions", &[ZapLogger]),
    (ZAP_PACKAGE, "Logger", "WithLazy", &[ZapLogger]),
    (ZAP_PACKAGE, "SugaredLogger", "Desugar", &[ZapLogger]),
    (ZAP_PACKAGE, "SugaredLogger", "With", &[ZapSugared]),
    (ZAP_PACKAGE, "SugaredLogger", "Named", &[ZapSugared]),
    (ZAP_PACKAGE, "SugaredLogger", "WithOptions", &[ZapSugared]),
    (ZAP_PACKAGE, "SugaredLogger", "WithLazy", &[ZapSugared]),
    (ZAP_PACKAGE, "Config", "Build", &[ZapLogger, Error]),
    (SLOG_PACKAGE, "Logger", "With", &[SlogLogger]),
    (SLOG_PACKAGE, "Logger", "WithGroup", &[SlogLogger]),
];

/// Results of the package-level function `package.name`, if it is known.
#[must_use]
pub fn function_results(package: &str, name: &str) -> Option<Vec<StaticType>> {
    FUNCTIONS
        .iter()
        .find(|(p, n, _)| *p == package && *n == name)
        .map(|(_, _, results)| results.iter().map(|k| k.static_type()).collect())
}

/// Results of method `name` on `package.receiver`, if it is known.
#[must_use]
pub fn method_results(package: &str, receiver: &str, name: &str) -> Option<Vec<StaticType>> {
    METHODS
        .iter()
        .find(|(p, r, n, _)| *p == package && *r == receiver && *n == name)
        .map(|(_, _, _, results)| results.iter().map(|k| k.static_type()).collect())
}
