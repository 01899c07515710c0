//! Dialogue messages and the presenter that reveals them.
use crate::{
    localization::TextResolver,
    npc::components::{Npc, PortraitRef},
};

use super::{fade::FadeValue, reveal::TextRevealState};

/// One resolved line of NPC dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueMessage {
    pub text: String,
    pub speaker: String,
    pub portrait: Option<PortraitRef>,
}

impl DialogueMessage {
    /// Resolves every dialogue key of `npc`, preserving order.
    pub fn resolve_all<T>(npc: &Npc, resolver: &T) -> Vec<Self>
    where
        T: TextResolver + ?Sized,
    {
        npc.dialogue_keys
            .iter()
            .map(|key| Self {
                text: resolver.resolve_text(key),
                speaker: npc.display_name.clone(),
                portrait: npc.portrait.clone(),
            })
            .collect()
    }
}

/// Everything the renderer needs to draw the dialogue box this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView<'a> {
    pub speaker: &'a str,
    pub portrait: Option<&'a PortraitRef>,
    pub visible_text: &'a str,
    pub more_indicator: bool,
    pub alpha: u8,
}

/// Typewriter reveal plus box opacity for the current message.
#[derive(Debug, Clone)]
pub struct DialoguePresenter {
    reveal: TextRevealState,
    fade: FadeValue,
    chars_per_second: f32,
}

impl DialoguePresenter {
    pub fn new(chars_per_second: f32, fade_rate: f32) -> Self {
        Self {
            reveal: TextRevealState::new(),
            fade: FadeValue::new(fade_rate),
            chars_per_second,
        }
    }

    /// Starts revealing `message` from its first character.
    pub fn show(&mut self, message: &DialogueMessage) {
        self.reveal.reset();
        self.reveal.update(0.0, &message.text, self.chars_per_second);
        self.fade.set_target(true);
    }

    pub fn update(&mut self, delta_seconds: f32, message: Option<&DialogueMessage>) {
        self.fade.update(delta_seconds);
        if let Some(message) = message {
            self.reveal
                .update(delta_seconds, &message.text, self.chars_per_second);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.fade.set_target(visible);
    }

    pub fn is_complete(&self) -> bool {
        self.reveal.is_complete()
    }

    pub fn force_complete(&mut self) {
        self.reveal.force_complete();
    }

    pub fn reset(&mut self) {
        self.reveal.reset();
        self.fade.reset();
    }

    pub fn alpha(&self) -> u8 {
        self.fade.alpha()
    }

    pub fn view<'a>(&'a self, message: &'a DialogueMessage) -> DialogueView<'a> {
        DialogueView {
            speaker: &message.speaker,
            portrait: message.portrait.as_ref(),
            visible_text: self.reveal.visible_text(),
            more_indicator: self.reveal.is_complete(),
            alpha: self.fade.alpha(),
        }
    }
}
