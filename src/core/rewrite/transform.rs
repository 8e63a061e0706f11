//! Source transformer: applies the rewrite rules to a whole file.
//!
//! The file is parsed with swc to find imports and tagged templates, but the
//! output is produced by splicing text at node spans. Everything outside a
//! rewritten template stays byte-for-byte identical, so line numbers and
//! formatting survive.

use std::{
    collections::{BTreeSet, HashSet},
    ops::Range,
};

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{Expr, ImportDecl, ImportSpecifier, Lit, ModuleExportName, TaggedTpl};
use swc_ecma_visit::{Visit, VisitWith};
use thiserror::Error;

use super::{RewriteError, RewriteRules, TemplateArg, is_rewritten, quote};
use crate::core::{
    data::SourceContext,
    key::Key,
    markers::{INTERPOLATE_EXPORT, INTERPOLATE_FN, LOCALIZE_EXPORTS},
    parsers::source::{ParsedSource, parse_source},
};

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("{}:{}:{}: {source}", .context.file_path(), .context.line(), .context.col())]
    Rewrite {
        context: SourceContext,
        source: RewriteError,
    },
}

pub struct TransformOptions<'a> {
    /// Module specifier whose localize exports are rewritten.
    pub import_source: &'a str,
    pub rules: &'a RewriteRules,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// Every key derived in this file.
    pub keys: BTreeSet<Key>,
    /// Number of tagged templates rewritten.
    pub rewritten: usize,
}

/// Rewrite every localization tagged template in `code`.
///
/// Returns `None` when the file does not mention the import source, was
/// already rewritten, or contains nothing to rewrite.
pub fn transform_source(
    code: &str,
    file_path: &str,
    options: &TransformOptions<'_>,
) -> Result<Option<TransformOutput>, TransformError> {
    if !code.contains(options.import_source) || is_rewritten(code) {
        return Ok(None);
    }

    let parsed =
        parse_source(code.to_string(), file_path).map_err(|message| TransformError::Parse {
            file: file_path.to_string(),
            message,
        })?;

    let mut imports = ImportCollector::new(options.import_source);
    parsed.module.visit_with(&mut imports);
    if imports.local_names.is_empty() {
        return Ok(None);
    }

    let mut templates = TemplateCollector::new(&parsed, &imports.local_names);
    parsed.module.visit_with(&mut templates);
    if templates.sites.is_empty() {
        return Ok(None);
    }
    templates.sites.sort_by_key(|s| s.range.start);

    let mut splicer = Splicer {
        code,
        file_path,
        parsed: &parsed,
        rules: options.rules,
        keys: BTreeSet::new(),
        deferred: false,
    };
    // The import declaration never contains a site, so the text splits cleanly
    // at its end and the runtime import can go in between.
    let split = imports
        .first_import_end
        .map_or(0, |end| parsed.offset(end));
    let sites = &templates.sites;
    let at = sites.partition_point(|s| s.range.start < split);
    let head = splicer.render(0..split, &sites[..at])?;
    let tail = splicer.render(split..code.len(), &sites[at..])?;

    let mut out = head;
    if splicer.deferred {
        out.push_str(&interpolate_import(code, split, options.import_source));
    }
    out.push_str(&tail);

    Ok(Some(TransformOutput {
        code: out,
        keys: splicer.keys,
        rewritten: templates.sites.len(),
    }))
}

/// Import of the runtime `interpolate` used by deferred plural calls, placed
/// on the same line as the import it follows.
fn interpolate_import(code: &str, at: usize, import_source: &str) -> String {
    let separator = if code[..at].ends_with(';') { " " } else { "; " };
    format!(
        "{}import {{{} as {}}} from {};",
        separator,
        INTERPOLATE_EXPORT,
        INTERPOLATE_FN,
        quote(import_source)
    )
}

/// Collects the local names bound to the localize exports of the import
/// source, e.g. `t` for `import {_ as t} from "i18n-bake"`.
struct ImportCollector<'a> {
    import_source: &'a str,
    local_names: HashSet<String>,
    first_import_end: Option<BytePos>,
}

impl<'a> ImportCollector<'a> {
    fn new(import_source: &'a str) -> Self {
        Self {
            import_source,
            local_names: HashSet::new(),
            first_import_end: None,
        }
    }
}

impl Visit for ImportCollector<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if node.type_only || node.src.value.as_str() != Some(self.import_source) {
            return;
        }
        if self.first_import_end.is_none() {
            self.first_import_end = Some(node.span.hi);
        }
        for specifier in &node.specifiers {
            if let ImportSpecifier::Named(named) = specifier {
                if named.is_type_only {
                    continue;
                }
                let local = named.local.sym.as_str();
                let imported = match &named.imported {
                    Some(ModuleExportName::Ident(ident)) => ident.sym.as_str(),
                    Some(ModuleExportName::Str(s)) => s.value.as_str().unwrap_or_default(),
                    None => local,
                };
                if LOCALIZE_EXPORTS.contains(&imported) {
                    self.local_names.insert(local.to_string());
                }
            }
        }
    }
}

/// A localization tagged template, by byte range in the original text.
struct Site {
    range: Range<usize>,
    lo: BytePos,
    fragments: Vec<String>,
    args: Vec<SiteArg>,
}

enum SiteArg {
    Literal(String),
    /// Expression source range; may contain further sites.
    Expr(Range<usize>),
}

/// Collects tagged templates whose tag is one of the localize names, in
/// source order. Nested templates follow the template containing them.
struct TemplateCollector<'a> {
    parsed: &'a ParsedSource,
    local_names: &'a HashSet<String>,
    sites: Vec<Site>,
}

impl<'a> TemplateCollector<'a> {
    fn new(parsed: &'a ParsedSource, local_names: &'a HashSet<String>) -> Self {
        Self {
            parsed,
            local_names,
            sites: Vec::new(),
        }
    }

    fn range(&self, span: swc_common::Span) -> Range<usize> {
        self.parsed.offset(span.lo)..self.parsed.offset(span.hi)
    }

    fn is_localize_tag(&self, tag: &Expr) -> bool {
        matches!(tag, Expr::Ident(ident) if self.local_names.contains(ident.sym.as_str()))
    }
}

impl Visit for TemplateCollector<'_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if self.is_localize_tag(&node.tag) && node.type_params.is_none() {
            let fragments = node
                .tpl
                .quasis
                .iter()
                .map(|quasi| {
                    quasi
                        .cooked
                        .as_ref()
                        .and_then(|cooked| cooked.as_str())
                        .unwrap_or(quasi.raw.as_str())
                        .to_string()
                })
                .collect();
            let args = node
                .tpl
                .exprs
                .iter()
                .map(|expr| match &**expr {
                    Expr::Lit(Lit::Str(s)) if s.value.as_str().is_some() => {
                        SiteArg::Literal(s.value.as_str().unwrap_or_default().to_string())
                    }
                    other => SiteArg::Expr(self.range(other.span())),
                })
                .collect();
            self.sites.push(Site {
                range: self.range(node.span),
                lo: node.span.lo,
                fragments,
                args,
            });
        }
        node.visit_children_with(self);
    }
}

/// Produces the rewritten text, innermost templates first.
struct Splicer<'a> {
    code: &'a str,
    file_path: &'a str,
    parsed: &'a ParsedSource,
    rules: &'a RewriteRules,
    keys: BTreeSet<Key>,
    deferred: bool,
}

impl Splicer<'_> {
    /// Render `range` of the original text with every site in `sites`
    /// (sorted, all inside `range`) replaced by its marker call.
    fn render(&mut self, range: Range<usize>, sites: &[Site]) -> Result<String, TransformError> {
        let mut out = String::with_capacity(range.len());
        let mut cursor = range.start;
        let mut i = 0;
        while i < sites.len() {
            let site = &sites[i];
            let nested = sites[i + 1..]
                .iter()
                .take_while(|s| s.range.start < site.range.end)
                .count();
            out.push_str(&self.code[cursor..site.range.start]);
            out.push_str(&self.render_site(site, &sites[i + 1..i + 1 + nested])?);
            cursor = site.range.end;
            i += 1 + nested;
        }
        out.push_str(&self.code[cursor..range.end]);
        Ok(out)
    }

    fn render_site(&mut self, site: &Site, nested: &[Site]) -> Result<String, TransformError> {
        let mut args = Vec::with_capacity(site.args.len());
        for arg in &site.args {
            args.push(match arg {
                SiteArg::Literal(value) => TemplateArg::Literal(value.clone()),
                SiteArg::Expr(range) => {
                    let from = nested.partition_point(|s| s.range.start < range.start);
                    let to = nested.partition_point(|s| s.range.start < range.end);
                    TemplateArg::Expr(self.render(range.clone(), &nested[from..to])?)
                }
            });
        }

        let call = self
            .rules
            .rewrite(&site.fragments, &args)
            .map_err(|source| TransformError::Rewrite {
                context: self.parsed.context(self.file_path, site.lo),
                source,
            })?;
        self.deferred |= call.deferred;
        let rendered = call.to_string();
        self.keys.insert(call.key);
        Ok(rendered)
    }
}
