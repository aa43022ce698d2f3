use crate::{
    ANY_RECORD, config::DiagnosticsConfig, error::ExpectationError, expect::delete::MockDelete,
};

/// Record argument as shown in diagnostics.
/// The first set constraint wins: record, contains, type, table.
fn record_arg(md: &MockDelete) -> String {
    if let Some(record) = &md.target_record {
        record.to_string()
    } else if let Some(partial) = &md.target_contains {
        format!("<Contains: {partial}>")
    } else if let Some(type_name) = &md.target_type {
        format!("<Type: {type_name}>")
    } else if let Some(table) = &md.target_table {
        format!("<Table: {table}>")
    } else {
        ANY_RECORD.to_string()
    }
}

/// `delete(ctx, <arg>, <modifiers>)`, prefixed by the declaring context.
pub(crate) fn describe_call(md: &MockDelete) -> String {
    let modifiers = if md.modifiers.is_empty() {
        String::new()
    } else {
        format!(", {}", md.modifiers)
    };

    format!(
        "{}delete(ctx, {}{modifiers})",
        md.assertion.context(),
        record_arg(md)
    )
}

/// `expect_delete(<modifiers>).for_type("<Type>")`, the registration that
/// would accept a call of this shape.
pub(crate) fn describe_registration(md: &MockDelete) -> String {
    let type_name = md
        .target_record
        .as_ref()
        .map(|record| record.type_name().to_string())
        .or_else(|| md.target_type.clone());

    let mut out = format!(
        "{}expect_delete({})",
        md.assertion.context(),
        md.modifiers
    );
    if let Some(type_name) = type_name {
        out.push_str(&format!(".for_type({type_name:?})"));
    } else if let Some(table) = &md.target_table {
        out.push_str(&format!(".for_table({table:?})"));
    }

    out
}

///
/// DiagnosticFormatter
///
/// Renders an unmatched call against the registered expectations,
/// bounded by the diagnostics configuration.
///

pub(crate) struct DiagnosticFormatter<'a> {
    config: &'a DiagnosticsConfig,
}

impl<'a> DiagnosticFormatter<'a> {
    pub(crate) const fn new(config: &'a DiagnosticsConfig) -> Self {
        Self { config }
    }

    pub(crate) fn unmatched(&self, call: &MockDelete, entries: &[MockDelete]) -> ExpectationError {
        let listed: Vec<&MockDelete> = entries
            .iter()
            .filter(|md| self.config.include_consumed || !md.assertion.is_exhausted())
            .collect();
        let shown = listed.len().min(self.config.max_candidates);

        ExpectationError::UnmatchedCall {
            call: describe_call(call),
            candidates: listed[..shown].iter().map(|md| describe_call(md)).collect(),
            omitted: listed.len() - shown,
            suggestion: self
                .config
                .suggest_registration
                .then(|| describe_registration(call)),
        }
    }
}
