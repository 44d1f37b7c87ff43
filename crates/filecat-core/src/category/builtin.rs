//! Builtin Category Definitions
//!
//! Bootstrapped whenever the settings file yields no categories, so that
//! classification is never a no-op on first run.

use crate::color::Rgb;

use super::definition::{CaseSensitivity, Category};

/// Static definition of a default category.
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    pub name: &'static str,
    pub color: Rgb,
    pub case_sensitive_suffixes: &'static [&'static str],
    pub case_insensitive_suffixes: &'static [&'static str],
    pub case_sensitive_patterns: &'static [&'static str],
    pub case_insensitive_patterns: &'static [&'static str],
}

impl BuiltinCategory {
    const fn suffixes(name: &'static str, color: Rgb, suffixes: &'static [&'static str]) -> Self {
        Self {
            name,
            color,
            case_sensitive_suffixes: suffixes,
            case_insensitive_suffixes: &[],
            case_sensitive_patterns: &[],
            case_insensitive_patterns: &[],
        }
    }
}

impl From<&BuiltinCategory> for Category {
    fn from(builtin: &BuiltinCategory) -> Self {
        let mut category = Category::new(builtin.name, builtin.color);
        category.add_suffixes(builtin.case_sensitive_suffixes, CaseSensitivity::Sensitive);
        category.add_suffixes(builtin.case_insensitive_suffixes, CaseSensitivity::Insensitive);
        let mut rejected =
            category.add_patterns(builtin.case_sensitive_patterns, CaseSensitivity::Sensitive);
        rejected.extend(
            category.add_patterns(builtin.case_insensitive_patterns, CaseSensitivity::Insensitive),
        );
        debug_assert!(rejected.is_empty(), "invalid builtin pattern: {:?}", rejected);
        category
    }
}

/// Default categories, in store order.
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory::suffixes("Ada", Rgb::new(0x00, 0x54, 0xe1), &["ada", "a", "adb", "ads"]),
    BuiltinCategory::suffixes("ASP, ASP.NET", Rgb::new(0x00, 0x40, 0x80), &["asp", "aspx"]),
    BuiltinCategory::suffixes("Bash", Rgb::new(0x00, 0xdd, 0xff), &["sh", "ksh", "bash"]),
    BuiltinCategory::suffixes("C Shell", Rgb::new(0xff, 0xfd, 0xce), &["csh", "tcsh"]),
    BuiltinCategory::suffixes("C#", Rgb::new(0x21, 0x1b, 0x0c), &["cs"]),
    BuiltinCategory::suffixes(
        "C/C++",
        Rgb::new(0x17, 0x00, 0x00),
        &["cpp", "c", "h", "hpp", "cc", "hh", "cxx", "hxx"],
    ),
    BuiltinCategory::suffixes("ColdFusion", Rgb::new(0x00, 0x1a, 0x64), &["cfm", "cfc", "cfs"]),
    BuiltinCategory::suffixes("CSS", Rgb::new(0x95, 0xbb, 0xef), &["css"]),
    BuiltinCategory::suffixes(
        "Fortran",
        Rgb::new(0x00, 0x1d, 0x36),
        &["f", "for", "f77", "f90", "f95", "f03", "hpf"],
    ),
    BuiltinCategory::suffixes(
        "HTML",
        Rgb::new(0xdc, 0xff, 0xff),
        &["htm", "html", "shtml", "stm", "sht", "oth", "xhtml"],
    ),
    BuiltinCategory::suffixes("Java", Rgb::new(0xaf, 0x8e, 0x00), &["java", "jar"]),
    BuiltinCategory::suffixes("JavaScript", Rgb::new(0x3e, 0x3b, 0x34), &["js", "mjs", "cjs"]),
    BuiltinCategory::suffixes(
        "Pascal",
        Rgb::new(0x24, 0x00, 0x00),
        &["pas", "p", "pp", "pa3", "pa4", "pa5"],
    ),
    BuiltinCategory::suffixes("Perl", Rgb::new(0xbd, 0xc7, 0xd9), &["pl", "pm"]),
    BuiltinCategory::suffixes("PHP", Rgb::new(0x49, 0x60, 0x7f), &["php"]),
    BuiltinCategory::suffixes("Python", Rgb::new(0x00, 0x8d, 0xff), &["py", "pyw", "pyi"]),
    BuiltinCategory::suffixes("Ruby", Rgb::new(0xff, 0xfb, 0x58), &["rb"]),
    BuiltinCategory::suffixes("Rust", Rgb::new(0xde, 0xa5, 0x84), &["rs"]),
    BuiltinCategory::suffixes("Go", Rgb::new(0x00, 0xad, 0xd8), &["go"]),
    BuiltinCategory::suffixes("SQL", Rgb::new(0x88, 0x75, 0x43), &["sql"]),
    BuiltinCategory::suffixes(
        "VB",
        Rgb::new(0x41, 0x22, 0x00),
        &["vb", "frm", "mod", "cls", "bas"],
    ),
    BuiltinCategory::suffixes("VHDL", Rgb::new(0x26, 0x00, 0x00), &["vhd", "vhdl"]),
    BuiltinCategory {
        name: "Documents",
        color: Rgb::new(0x33, 0xcc, 0x33),
        case_sensitive_suffixes: &[],
        case_insensitive_suffixes: &[
            "txt", "md", "pdf", "odt", "ods", "odp", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
            "rtf",
        ],
        case_sensitive_patterns: &[],
        case_insensitive_patterns: &["readme", "license", "copying", "changelog"],
    },
    BuiltinCategory {
        name: "Archives",
        color: Rgb::new(0x00, 0xff, 0x00),
        case_sensitive_suffixes: &[],
        case_insensitive_suffixes: &[
            "zip", "tar", "gz", "tgz", "bz2", "tbz2", "xz", "txz", "zst", "7z", "rar", "cpio",
            "rpm", "deb",
        ],
        case_sensitive_patterns: &[],
        case_insensitive_patterns: &[],
    },
    BuiltinCategory {
        name: "Build Files",
        color: Rgb::new(0xff, 0x99, 0x00),
        case_sensitive_suffixes: &["cmake", "mk", "mak"],
        case_insensitive_suffixes: &[],
        case_sensitive_patterns: &[
            "Makefile",
            "makefile",
            "GNUmakefile",
            "Makefile.*",
            "Dockerfile*",
            "Jenkinsfile",
        ],
        case_insensitive_patterns: &[],
    },
];
