//! Playback-side helpers that consume compiled instructions.

pub(crate) mod special_styles;
