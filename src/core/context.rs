use std::{
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        Key,
        file_scanner::scan_files,
        parsers::locale_file::{LocaleFile, load_locales},
        rewrite::{
            RewriteError, RewriteRules, TransformError, TransformOptions, TransformOutput,
            transform_source,
        },
        runtime::Localizer,
        store::TranslationStore,
    },
    issues::{MultilineKeyIssue, ParseErrorIssue},
};

/// Result of running the source transformer over every scanned file.
#[derive(Default)]
pub struct SourceData {
    /// Rewritten files, by path. Files with nothing to rewrite are absent.
    pub outputs: BTreeMap<String, TransformOutput>,
    pub parse_errors: Vec<ParseErrorIssue>,
    pub key_errors: Vec<MultilineKeyIssue>,
}

impl SourceData {
    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty() || !self.key_errors.is_empty()
    }
}

/// Project state shared by the commands.
///
/// Configuration priority: CLI arguments, then `.i18nbakerc.json`, then
/// built-in defaults. Locale files are loaded eagerly so configuration
/// problems surface before any work is done; sources are transformed on
/// first access.
pub struct BuildContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Source files to transform.
    pub files: BTreeSet<String>,

    pub verbose: bool,

    locale_files: Vec<LocaleFile>,
    store: TranslationStore,
    rules: RewriteRules,

    sources: OnceCell<SourceData>,
    used_keys: OnceCell<BTreeSet<Key>>,
}

impl BuildContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .i18nbakerc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref default_locale) = common_args.default_locale {
            config.default_locale = Some(default_locale.clone());
        }
        if let Some(ref locales_dir) = common_args.locales_dir {
            config.locales_dir = locales_dir.to_string_lossy().to_string();
        }
        config.validate()?;

        let locales_dir = resolve_path(&root_dir, &config.locales_dir);
        let scan_root = resolve_path(&root_dir, &config.source_root);
        let scan_root = scan_root
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", scan_root))?;

        let (scan_result, locale_result) = rayon::join(
            || scan_files(scan_root, &config.includes, &config.ignores, verbose),
            || load_locales(&locales_dir, &config.locales, config.add_missing, config.tabs),
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let locale_files = locale_result?;
        let store = TranslationStore::from_locales(locale_files.iter().map(|f| f.data.clone()))
            .with_context(|| format!("Invalid locales in {}", locales_dir.display()))?;
        let rules = RewriteRules::for_store(&store);

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            locale_files,
            store,
            rules,
            sources: OnceCell::new(),
            used_keys: OnceCell::new(),
        })
    }

    pub fn locale_files(&self) -> &[LocaleFile] {
        &self.locale_files
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn rules(&self) -> &RewriteRules {
        &self.rules
    }

    /// Runtime context over the loaded locales, at the configured default.
    pub fn localizer(&self) -> Result<Localizer> {
        Ok(Localizer::new(
            self.store.clone(),
            self.config.default_locale(),
        )?)
    }

    /// Transform every source file (lazy initialization).
    ///
    /// Files are read and rewritten in parallel; each gets its own swc
    /// source map and globals.
    pub fn sources(&self) -> &SourceData {
        self.sources.get_or_init(|| {
            let options = TransformOptions {
                import_source: &self.config.import_source,
                rules: &self.rules,
            };

            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let result = fs::read_to_string(file_path)
                        .map_err(|e| format!("Failed to read file: {}", e))
                        .map(|code| transform_source(&code, file_path, &options));
                    (file_path.clone(), result)
                })
                .collect();

            let mut data = SourceData::default();
            for (file_path, result) in results {
                match result {
                    Ok(Ok(Some(output))) => {
                        if self.verbose {
                            eprintln!("Rewrote {} template(s) in {}", output.rewritten, file_path);
                        }
                        data.outputs.insert(file_path, output);
                    }
                    Ok(Ok(None)) => {}
                    Ok(Err(TransformError::Rewrite { context, source })) => {
                        let RewriteError::MultilineKey { fragments } = source;
                        data.key_errors.push(MultilineKeyIssue { context, fragments });
                    }
                    Ok(Err(TransformError::Parse { file, message })) => {
                        data.parse_errors.push(ParseErrorIssue {
                            file_path: file,
                            error: message,
                        });
                    }
                    Err(error) => data.parse_errors.push(ParseErrorIssue { file_path, error }),
                }
            }
            data
        })
    }

    /// Every key derived from the sources (lazy initialization).
    pub fn used_keys(&self) -> &BTreeSet<Key> {
        self.used_keys.get_or_init(|| {
            self.sources()
                .outputs
                .values()
                .flat_map(|output| output.keys.iter().cloned())
                .collect()
        })
    }

    /// Directory the scanned source paths start with.
    pub fn scan_root(&self) -> PathBuf {
        resolve_path(&self.root_dir, &self.config.source_root)
    }
}

/// Resolve a configured path against the project root. With the root `.`
/// the configured path is kept as written, so output shows `./i18n` rather
/// than `././i18n`.
fn resolve_path(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
