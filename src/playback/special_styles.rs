use std::{cell::RefCell, collections::HashMap, rc::Rc};

use indexmap::IndexMap;

use crate::{
    foundation::core::{ElementId, StyleMap, StyleValue},
    timeline::instruction::Keyframe,
};

/// Properties a player cannot interpolate; they flip at the start and end of playback instead.
pub const NON_ANIMATABLE_PROPS: [&str; 2] = ["display", "position"];

pub fn is_non_animatable(prop: &str) -> bool {
    NON_ANIMATABLE_PROPS.contains(&prop)
}

/// Read/write access to the live inline styles of elements.
///
/// `None` means the property is not set on the element.
pub trait StyleHost {
    fn style(&self, element: ElementId, prop: &str) -> Option<StyleValue>;

    fn set_style(&self, element: ElementId, prop: &str, value: &StyleValue);

    fn erase_style(&self, element: ElementId, prop: &str);
}

impl<T: StyleHost + ?Sized> StyleHost for &T {
    fn style(&self, element: ElementId, prop: &str) -> Option<StyleValue> {
        (**self).style(element, prop)
    }

    fn set_style(&self, element: ElementId, prop: &str, value: &StyleValue) {
        (**self).set_style(element, prop, value)
    }

    fn erase_style(&self, element: ElementId, prop: &str) {
        (**self).erase_style(element, prop)
    }
}

impl<T: StyleHost + ?Sized> StyleHost for Rc<T> {
    fn style(&self, element: ElementId, prop: &str) -> Option<StyleValue> {
        (**self).style(element, prop)
    }

    fn set_style(&self, element: ElementId, prop: &str, value: &StyleValue) {
        (**self).set_style(element, prop, value)
    }

    fn erase_style(&self, element: ElementId, prop: &str) {
        (**self).erase_style(element, prop)
    }
}

type InitialStyles = Rc<RefCell<IndexMap<String, Option<StyleValue>>>>;

/// Values elements had before any special-cased playback touched them, keyed by element.
///
/// Cloning yields another handle to the same table. Entries are created on first use and removed
/// when a [`SpecialCasedStyles`] for the element is destroyed; players that already hold an
/// entry keep it alive.
#[derive(Clone, Debug, Default)]
pub struct InitialStyleTable {
    inner: Rc<RefCell<HashMap<ElementId, InitialStyles>>>,
}

impl InitialStyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.inner.borrow().contains_key(&element)
    }

    /// Remembered value of `prop` on `element`; `Some(None)` means it was unset.
    pub fn initial_value(&self, element: ElementId, prop: &str) -> Option<Option<StyleValue>> {
        self.inner
            .borrow()
            .get(&element)
            .and_then(|styles| styles.borrow().get(prop).cloned())
    }

    fn entry(&self, element: ElementId) -> InitialStyles {
        Rc::clone(self.inner.borrow_mut().entry(element).or_default())
    }

    fn remove(&self, element: ElementId) {
        self.inner.borrow_mut().remove(&element);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlaybackState {
    Pending,
    Started,
    Finished,
    Destroyed,
}

/// Applies the non-animatable styles of one player around its playback.
///
/// The state only moves forward. Dropping the value destroys it, which restores the element's
/// initial styles.
pub struct SpecialCasedStyles<H: StyleHost> {
    host: H,
    element: ElementId,
    table: InitialStyleTable,
    initial: InitialStyles,
    start_styles: Option<StyleMap>,
    end_styles: Option<StyleMap>,
    state: PlaybackState,
}

impl<H: StyleHost> SpecialCasedStyles<H> {
    /// Extracts the non-animatable styles from the first and last keyframe.
    ///
    /// Returns `None` when there is nothing to special-case.
    pub fn initialize(
        host: H,
        table: &InitialStyleTable,
        element: ElementId,
        keyframes: &[Keyframe],
    ) -> Option<Self> {
        let start_styles = keyframes.first().and_then(|k| non_animatable(&k.styles));
        let end_styles = if keyframes.len() > 1 {
            keyframes.last().and_then(|k| non_animatable(&k.styles))
        } else {
            None
        };

        if start_styles.is_none() && end_styles.is_none() {
            return None;
        }

        Some(Self {
            host,
            element,
            table: table.clone(),
            initial: table.entry(element),
            start_styles,
            end_styles,
            state: PlaybackState::Pending,
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn start(&mut self) {
        if self.state >= PlaybackState::Started {
            return;
        }
        if let Some(styles) = &self.start_styles {
            for (prop, value) in styles {
                // The first player to touch a property owns its initial value.
                if !self.initial.borrow().contains_key(prop) {
                    let before = self.host.style(self.element, prop);
                    self.initial.borrow_mut().insert(prop.clone(), before);
                }
                self.host.set_style(self.element, prop, value);
            }
        }
        self.state = PlaybackState::Started;
    }

    pub fn finish(&mut self) {
        self.start();
        if self.state >= PlaybackState::Finished {
            return;
        }
        self.restore_initial();
        if let Some(styles) = &self.end_styles {
            for (prop, value) in styles {
                self.host.set_style(self.element, prop, value);
            }
        }
        self.state = PlaybackState::Finished;
    }

    pub fn destroy(&mut self) {
        self.finish();
        if self.state >= PlaybackState::Destroyed {
            return;
        }
        self.table.remove(self.element);
        for styles in [self.start_styles.take(), self.end_styles.take()]
            .into_iter()
            .flatten()
        {
            for prop in styles.keys() {
                self.host.erase_style(self.element, prop);
            }
        }
        self.restore_initial();
        self.state = PlaybackState::Destroyed;
        tracing::trace!(element = %self.element, "special-cased styles destroyed");
    }

    fn restore_initial(&self) {
        for (prop, value) in self.initial.borrow().iter() {
            match value {
                Some(value) => self.host.set_style(self.element, prop, value),
                None => self.host.erase_style(self.element, prop),
            }
        }
    }
}

impl<H: StyleHost> Drop for SpecialCasedStyles<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn non_animatable(styles: &StyleMap) -> Option<StyleMap> {
    let picked: StyleMap = styles
        .iter()
        .filter(|(prop, _)| is_non_animatable(prop))
        .map(|(prop, value)| (prop.clone(), value.clone()))
        .collect();
    (!picked.is_empty()).then_some(picked)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/special_styles.rs"]
mod tests;
