//! Routes characters into the three target buffers and decides when to publish

use std::borrow::Cow;
use std::sync::Arc;

use super::{Renderer, StreamBuffer, Target};
use crate::highlight;
use crate::markdown::MarkdownConverter;

/// Owns the target buffers; the only writer of stream state.
///
/// No method here waits or sleeps. Publishing hands the current value to the
/// [`Renderer`] and returns immediately.
pub struct Coordinator {
    buffers: [StreamBuffer; 3],
    /// Length in characters of the complete Markdown document
    work_len: usize,
    converter: Arc<dyn MarkdownConverter>,
    renderer: Arc<dyn Renderer>,
}

impl Coordinator {
    pub fn new(
        work_len: usize,
        converter: Arc<dyn MarkdownConverter>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            buffers: Default::default(),
            work_len,
            converter,
            renderer,
        }
    }

    /// Append `chars` to `target`, publishing when `publish` allows it.
    ///
    /// - Stylesheet: published only when `chars` is exactly `;`, so the page
    ///   never sees a half-written declaration.
    /// - Editor: mirrored into the stylesheet first, then highlighted one
    ///   character at a time.
    /// - Work: published as plain text until the whole document is in, then
    ///   as converted HTML.
    ///
    /// Returns the target's buffer after the write.
    pub fn write(&mut self, target: Target, chars: &str, publish: bool) -> &str {
        match target {
            Target::Stylesheet => {
                let buffer = &mut self.buffers[Target::Stylesheet.index()];
                buffer.text.push_str(chars);
                buffer.consumed += chars.chars().count();
                if publish && chars == ";" {
                    self.renderer.render(Target::Stylesheet, &buffer.text);
                }
            }
            Target::Editor => {
                self.write(Target::Stylesheet, chars, publish);

                let buffer = &mut self.buffers[Target::Editor.index()];
                for ch in chars.chars() {
                    highlight::feed(&mut buffer.text, &mut buffer.lex, ch);
                    buffer.consumed += 1;
                }
                if publish {
                    self.renderer.render(Target::Editor, &buffer.text);
                }
            }
            Target::Work => {
                let buffer = &mut self.buffers[Target::Work.index()];
                buffer.text.push_str(chars);
                buffer.consumed += chars.chars().count();
                if publish {
                    if buffer.consumed >= self.work_len {
                        let html = self.converter.to_html(&buffer.text);
                        self.renderer.render(Target::Work, &html);
                    } else {
                        self.renderer.render(Target::Work, &buffer.text);
                    }
                }
            }
        }

        &self.buffers[target.index()].text
    }

    /// Write every character of `text` to `target` without publishing
    pub fn replay(&mut self, target: Target, text: &str) {
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            self.write(target, ch.encode_utf8(&mut utf8), false);
        }
    }

    /// Current buffer contents for `target`
    pub fn buffer(&self, target: Target) -> &str {
        &self.buffers[target.index()].text
    }

    /// Number of source characters written to `target`
    pub fn consumed(&self, target: Target) -> usize {
        self.buffers[target.index()].consumed
    }

    /// True once the whole Markdown document has been written
    pub fn is_work_complete(&self) -> bool {
        self.buffers[Target::Work.index()].consumed >= self.work_len
    }

    /// Empty every buffer without publishing
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }

    /// Empty every buffer and publish the empty values
    pub fn reset(&mut self) {
        self.clear();
        for target in Target::ALL {
            self.renderer.render(target, "");
        }
    }

    /// Value observers should see for `target`.
    ///
    /// The work target is converted to HTML once the whole document is in
    /// and returned as plain text before that.
    pub fn resolved(&self, target: Target) -> Cow<'_, str> {
        let text = self.buffer(target);
        if target == Target::Work && self.is_work_complete() {
            Cow::Owned(self.converter.to_html(text))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Publish the resolved value of `target`
    pub fn publish(&self, target: Target) {
        self.renderer.render(target, &self.resolved(target));
    }

    /// Publish each target's resolved value
    pub fn publish_all(&self) {
        for target in Target::ALL {
            self.publish(target);
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("buffers", &self.buffers)
            .field("work_len", &self.work_len)
            .finish_non_exhaustive()
    }
}
