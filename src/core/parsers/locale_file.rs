use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::{
    locale::{Locale, LocaleCode, LocaleError},
    store::LocaleData,
};

/// Tab detection only looks at the start of the file.
const INDENT_SNIFF_LEN: usize = 100;

/// A locale file as loaded from (or synthesized for) the locales directory.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub path: PathBuf,
    pub data: LocaleData,
    /// Write the file back with tab indentation.
    pub tabs: bool,
    /// The file did not exist and was synthesized.
    pub created: bool,
}

impl LocaleFile {
    pub fn save(&self) -> Result<()> {
        save_locale(&self.path, &self.data, self.tabs)
    }
}

pub fn locale_file_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{}.json", locale))
}

/// Load one locale file per configured locale.
///
/// Missing files are synthesized with no translations, and written to disk
/// when `add_missing` is set. A missing `name` defaults to `xx (YY)` or the
/// locale itself. Fails on invalid locale codes, a file whose `locale` field
/// differs from its file name, and fallbacks outside `locales`.
pub fn load_locales(
    dir: &Path,
    locales: &[Locale],
    add_missing: bool,
    tabs: bool,
) -> Result<Vec<LocaleFile>> {
    if add_missing {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create locales directory: {}", dir.display()))?;
    }

    let mut files = Vec::with_capacity(locales.len());
    for locale in locales {
        let code = LocaleCode::parse(locale)?;
        let path = locale_file_path(dir, locale);

        let file = if path.exists() {
            let (mut data, file_tabs) = read_locale_file(&path, locale)?;
            if data.name.is_none() {
                data.name = Some(code.default_name());
            }
            if let Some(fallback) = &data.fallback
                && !locales.contains(fallback)
            {
                return Err(LocaleError::UnknownFallback {
                    locale: locale.clone(),
                    fallback: fallback.clone(),
                })
                .with_context(|| format!("Invalid locale file: {}", path.display()));
            }
            LocaleFile {
                path,
                data,
                tabs: file_tabs,
                created: false,
            }
        } else {
            let file = LocaleFile {
                path,
                data: LocaleData::new(locale.clone()).with_name(code.default_name()),
                tabs,
                created: true,
            };
            if add_missing {
                file.save()?;
            }
            file
        };
        files.push(file);
    }
    Ok(files)
}

/// Read and check one locale file. Also reports whether it is indented with
/// tabs.
pub fn read_locale_file(path: &Path, locale: &str) -> Result<(LocaleData, bool)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
    let data: LocaleData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;

    if data.locale != locale {
        return Err(LocaleError::Mismatch {
            expected: locale.to_string(),
            found: data.locale,
        })
        .with_context(|| format!("Invalid locale file: {}", path.display()));
    }

    let head: String = content.chars().take(INDENT_SNIFF_LEN).collect();
    Ok((data, head.contains('\t')))
}

/// Write a locale file as pretty JSON with a trailing newline. Translations
/// are written sorted by key.
pub fn save_locale(path: &Path, data: &LocaleData, tabs: bool) -> Result<()> {
    let indent: &[u8] = if tabs { b"\t" } else { b"  " };
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    data.serialize(&mut ser)
        .with_context(|| format!("Failed to serialize locale {}", data.locale))?;
    buf.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, buf).with_context(|| format!("Failed to write locale file: {}", path.display()))
}
