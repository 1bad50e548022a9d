use crate::{dsl::ast::AnimationOptions, foundation::core::StyleMap};

pub const DEFAULT_ENTER_CLASS: &str = "kf-enter";
pub const DEFAULT_LEAVE_CLASS: &str = "kf-leave";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Inputs of a compile run besides the tree itself.
pub struct CompileOpts {
    /// Class that replaces `:enter` in query selectors.
    pub enter_class_name: String,
    /// Class that replaces `:leave` in query selectors.
    pub leave_class_name: String,
    /// Styles of the root element before the animation starts.
    pub starting_styles: StyleMap,
    /// Styles of the root element once a trailing `animate(duration)` settles.
    pub final_styles: StyleMap,
    /// Root options: initial delay and params.
    pub options: AnimationOptions,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            enter_class_name: DEFAULT_ENTER_CLASS.to_string(),
            leave_class_name: DEFAULT_LEAVE_CLASS.to_string(),
            starting_styles: StyleMap::new(),
            final_styles: StyleMap::new(),
            options: AnimationOptions::default(),
        }
    }
}

impl CompileOpts {
    pub fn with_starting_styles(mut self, styles: StyleMap) -> Self {
        self.starting_styles = styles;
        self
    }

    pub fn with_final_styles(mut self, styles: StyleMap) -> Self {
        self.final_styles = styles;
        self
    }

    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = options;
        self
    }
}
