//! Stored macro definitions.

use std::sync::Arc;

use hal_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use hal_ir::{ExpansionSite, Location};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

/// One `REPLACE` definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MacroDefinition {
    pub name: String,
    /// Formal parameter names in position order.
    pub parameters: Vec<String>,
    /// Replacement text, rescanned on every expansion.
    pub body: String,
    /// Where the macro name appears in its `REPLACE` statement.
    pub location: Location,
}

impl MacroDefinition {
    pub fn new(name: impl Into<String>, body: impl Into<String>, location: Location) -> Self {
        MacroDefinition {
            name: name.into(),
            parameters: Vec::new(),
            body: body.into(),
            location,
        }
    }

    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Position of a formal parameter.
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == name)
    }
}

/// Read access to macro definitions.
pub trait MacroStore {
    fn lookup_macro(&self, name: &str) -> Option<Arc<MacroDefinition>>;
}

/// Definitions by name. Names are case-sensitive.
#[derive(Clone, Debug, Default)]
pub struct MacroTable {
    macros: FxHashMap<String, Arc<MacroDefinition>>,
}

/// A table shared between whoever defines macros and the expander.
pub type SharedMacroTable = Arc<RwLock<MacroTable>>;

impl MacroTable {
    pub fn new() -> Self {
        MacroTable::default()
    }

    pub fn shared() -> SharedMacroTable {
        Arc::new(RwLock::new(MacroTable::new()))
    }

    /// Store a definition, returning the one it replaces.
    pub fn insert(&mut self, definition: MacroDefinition) -> Option<Arc<MacroDefinition>> {
        self.macros
            .insert(definition.name.clone(), Arc::new(definition))
    }

    /// Store a definition from source text, reporting excess formals and
    /// redefinitions. Formals beyond `max_parameters` are dropped.
    pub fn define(
        &mut self,
        mut definition: MacroDefinition,
        max_parameters: usize,
        sink: &mut dyn DiagnosticSink,
    ) {
        if definition.parameters.len() > max_parameters {
            sink.report(
                Diagnostic::error(ErrorCode::E1005)
                    .with_message(format!(
                        "`{}` has {} formal parameters; at most {max_parameters} are allowed",
                        definition.name,
                        definition.parameters.len()
                    ))
                    .with_label(definition.location, "extra parameters ignored"),
            );
            definition.parameters.truncate(max_parameters);
        }
        debug!(
            name = %definition.name,
            arity = definition.arity(),
            "macro defined"
        );
        let location = definition.location;
        if let Some(previous) = self.insert(definition) {
            sink.report(
                Diagnostic::warning(ErrorCode::E1006)
                    .with_message(format!("macro `{}` redefined", previous.name))
                    .with_label(location, "new definition")
                    .with_secondary_label(previous.location, "previous definition"),
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<MacroDefinition>> {
        self.macros.get(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl MacroStore for MacroTable {
    fn lookup_macro(&self, name: &str) -> Option<Arc<MacroDefinition>> {
        self.macros.get(name).cloned()
    }
}

impl MacroStore for RwLock<MacroTable> {
    fn lookup_macro(&self, name: &str) -> Option<Arc<MacroDefinition>> {
        self.read().lookup_macro(name)
    }
}

impl<T: MacroStore + ?Sized> MacroStore for Arc<T> {
    fn lookup_macro(&self, name: &str) -> Option<Arc<MacroDefinition>> {
        (**self).lookup_macro(name)
    }
}

impl<T: MacroStore + ?Sized> MacroStore for &T {
    fn lookup_macro(&self, name: &str) -> Option<Arc<MacroDefinition>> {
        (**self).lookup_macro(name)
    }
}

/// One expansion, recorded for the cross-reference listing.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MacroUse {
    pub name: String,
    pub site: Arc<ExpansionSite>,
}

impl MacroUse {
    pub fn location(&self) -> Location {
        self.site.call_site
    }
}

#[cfg(test)]
mod tests;
