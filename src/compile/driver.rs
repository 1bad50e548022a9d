use crate::foundation::core::ElementId;

/// Resolves selectors against the host's element tree.
///
/// `multi == false` asks for at most one element. Results must be in document order; the
/// compiler applies query limits on top of them.
pub trait Driver {
    fn query(&self, element: ElementId, selector: &str, multi: bool) -> Vec<ElementId>;
}

impl<T: Driver + ?Sized> Driver for &T {
    fn query(&self, element: ElementId, selector: &str, multi: bool) -> Vec<ElementId> {
        (**self).query(element, selector, multi)
    }
}

/// One row of a [`StaticDriver`] table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryEntry {
    /// Element the query runs from.
    pub context: ElementId,
    /// Selector exactly as the compiler sends it (`:enter`/`:leave` already rewritten).
    pub selector: String,
    #[serde(default)]
    pub matches: Vec<ElementId>,
}

/// A [`Driver`] backed by a fixed lookup table.
///
/// Unknown `(context, selector)` pairs match nothing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StaticDriver {
    entries: Vec<QueryEntry>,
}

impl StaticDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<QueryEntry>) -> Self {
        Self { entries }
    }

    /// Adds (or replaces) the matches for `selector` run from `context`.
    pub fn with(
        mut self,
        context: ElementId,
        selector: impl Into<String>,
        matches: impl IntoIterator<Item = ElementId>,
    ) -> Self {
        let selector = selector.into();
        let matches: Vec<ElementId> = matches.into_iter().collect();
        match self
            .entries
            .iter_mut()
            .find(|e| e.context == context && e.selector == selector)
        {
            Some(entry) => entry.matches = matches,
            None => self.entries.push(QueryEntry {
                context,
                selector,
                matches,
            }),
        }
        self
    }

    pub fn entries(&self) -> &[QueryEntry] {
        &self.entries
    }
}

impl Driver for StaticDriver {
    fn query(&self, element: ElementId, selector: &str, multi: bool) -> Vec<ElementId> {
        let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.context == element && e.selector == selector)
        else {
            return Vec::new();
        };
        if multi {
            entry.matches.clone()
        } else {
            entry.matches.iter().take(1).copied().collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/driver.rs"]
mod tests;
