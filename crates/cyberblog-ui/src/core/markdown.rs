//! Markdown editor text transformations.
//!
//! # Design
//! - Every toolbar button and keyboard shortcut resolves to a [`MarkdownAction`]
//!   and goes through [`MarkdownAction::apply`]; no other code edits the buffer.
//! - Positions are UTF-16 code units because that is what `selectionStart` and
//!   `selectionEnd` report. Out-of-range or reversed selections are clamped.
//! - Caret offsets are signed and relative to the end of the inserted text.

use std::str::FromStr;
use thiserror::Error;

/// Spaces inserted by the `Tab` key.
pub const INDENT: &str = "    ";
/// Textareas that get a toolbar.
pub const EDITOR_SELECTOR: &str = "textarea.markdown-editor";
/// Toolbar container inserted before the textarea.
pub const TOOLBAR_CLASS: &str = "markdown-toolbar";
/// Toolbar buttons.
pub const TOOL_BUTTON_CLASS: &str = "md-btn";
/// Preview toggle inserted after the textarea.
pub const PREVIEW_BUTTON_CLASS: &str = "btn btn-outline btn-sm markdown-preview-btn";
/// Placeholder panel shown in preview mode.
pub const PREVIEW_PANEL_CLASS: &str = "markdown-preview";

const TEXT_PLACEHOLDER: &str = "текст";
const HEADING_PLACEHOLDER: &str = "Заголовок";
const LINK_PLACEHOLDER: &str = "текст ссылки";
const CODE_PLACEHOLDER: &str = "код";
const LIST_PLACEHOLDER: &str = "- Элемент списка";
const QUOTE_PLACEHOLDER: &str = "> Цитата";

/// Formatting actions offered by the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkdownAction {
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `## text`
    Heading,
    /// `[text](url)`
    Link,
    /// Inline backticks or a fenced block for multi-line selections.
    Code,
    /// `- ` prefix on every line.
    List,
    /// `> ` prefix on every line.
    Quote,
}

/// Result of a buffer edit: the new value and where the caret goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    /// Full textarea value after the edit.
    pub text: String,
    /// Collapsed caret position in UTF-16 code units.
    pub caret: u32,
}

/// Unknown `data-action` tag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown markdown action `{0}`")]
pub struct UnknownAction(pub String);

impl MarkdownAction {
    /// Toolbar order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Bold,
            Self::Italic,
            Self::Heading,
            Self::Link,
            Self::Code,
            Self::List,
            Self::Quote,
        ]
    }

    /// Value of the button's `data-action` attribute.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Heading => "heading",
            Self::Link => "link",
            Self::Code => "code",
            Self::List => "list",
            Self::Quote => "quote",
        }
    }

    /// Button face.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Heading => "H",
            Self::Link => "🔗",
            Self::Code => "</>",
            Self::List => "☰",
            Self::Quote => "\"",
        }
    }

    /// Letter bound to `Ctrl+<letter>`, when the action has a shortcut.
    #[must_use]
    pub const fn shortcut(self) -> Option<char> {
        match self {
            Self::Bold => Some('b'),
            Self::Italic => Some('i'),
            Self::Link => Some('k'),
            Self::Heading | Self::Code | Self::List | Self::Quote => None,
        }
    }

    /// Replacement for the selected text and the caret offset from its end.
    fn template(self, selected: &str) -> (String, i64) {
        let empty = selected.is_empty();
        let pick = |placeholder: &'static str| or_placeholder(selected, placeholder).to_string();
        match self {
            Self::Bold => (
                format!("**{}**", pick(TEXT_PLACEHOLDER)),
                if empty { -2 } else { 0 },
            ),
            Self::Italic => (
                format!("*{}*", pick(TEXT_PLACEHOLDER)),
                if empty { -1 } else { 0 },
            ),
            Self::Heading => (
                format!("## {}", pick(HEADING_PLACEHOLDER)),
                if empty { -9 } else { 0 },
            ),
            Self::Link => (
                format!("[{}](url)", pick(LINK_PLACEHOLDER)),
                if empty { -15 } else { -5 },
            ),
            Self::Code if selected.contains('\n') => (
                format!("```\n{}\n```", pick(CODE_PLACEHOLDER)),
                if empty { -4 } else { 0 },
            ),
            Self::Code => (
                format!("`{}`", pick(CODE_PLACEHOLDER)),
                if empty { -1 } else { 0 },
            ),
            Self::List if empty => (LIST_PLACEHOLDER.to_string(), 0),
            Self::List => (prefix_lines(selected, "- "), 0),
            Self::Quote if empty => (QUOTE_PLACEHOLDER.to_string(), 0),
            Self::Quote => (prefix_lines(selected, "> "), 0),
        }
    }

    /// Replace `[start, end)` of `text` with this action's markup.
    #[must_use]
    pub fn apply(self, text: &str, start: u32, end: u32) -> TextEdit {
        let selection = Selection::resolve(text, start, end);
        let (replacement, offset) = self.template(selection.selected(text));
        selection.replace(text, &replacement, offset)
    }
}

impl FromStr for MarkdownAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|action| action.tag() == value)
            .ok_or_else(|| UnknownAction(value.to_string()))
    }
}

/// Replace the selection with [`INDENT`] and put the caret after it.
#[must_use]
pub fn indent(text: &str, start: u32, end: u32) -> TextEdit {
    Selection::resolve(text, start, end).replace(text, INDENT, 0)
}

/// What a keydown inside the editor should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    /// Run a toolbar action.
    Format(MarkdownAction),
    /// Insert [`INDENT`].
    Indent,
}

impl EditorCommand {
    /// Map a `keydown` to a command. `Tab` indents regardless of modifiers.
    #[must_use]
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        if key == "Tab" {
            return Some(Self::Indent);
        }
        if !ctrl {
            return None;
        }
        let mut chars = key.chars();
        let letter = chars.next().filter(|_| chars.next().is_none())?;
        MarkdownAction::all()
            .into_iter()
            .find(|action| action.shortcut() == Some(letter))
            .map(Self::Format)
    }

    /// Apply the command to the buffer.
    #[must_use]
    pub fn apply(self, text: &str, start: u32, end: u32) -> TextEdit {
        match self {
            Self::Format(action) => action.apply(text, start, end),
            Self::Indent => indent(text, start, end),
        }
    }
}

/// Preview toggle of one editor instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    active: bool,
}

impl PreviewState {
    /// Flip between editing and preview; returns the new state.
    pub const fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Whether the placeholder panel is shown instead of the textarea.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.active
    }

    /// Translation key for the toggle button label in the current state.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        if self.active {
            "editor.edit"
        } else {
            "editor.preview"
        }
    }
}

fn or_placeholder<'a>(selected: &'a str, placeholder: &'a str) -> &'a str {
    if selected.is_empty() {
        placeholder
    } else {
        selected
    }
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Selection resolved to byte offsets on char boundaries.
#[derive(Clone, Copy, Debug)]
struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    fn resolve(text: &str, start: u32, end: u32) -> Self {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: byte_index(text, low),
            end: byte_index(text, high),
        }
    }

    fn selected(self, text: &str) -> &str {
        &text[self.start..self.end]
    }

    fn replace(self, text: &str, replacement: &str, offset: i64) -> TextEdit {
        let prefix = &text[..self.start];
        let mut out = String::with_capacity(text.len() + replacement.len());
        out.push_str(prefix);
        out.push_str(replacement);
        out.push_str(&text[self.end..]);
        let caret = utf16_len(prefix) + utf16_len(replacement) + offset;
        TextEdit {
            text: out,
            caret: u32::try_from(caret.max(0)).unwrap_or(u32::MAX),
        }
    }
}

fn utf16_len(text: &str) -> i64 {
    text.chars().map(|c| i64::try_from(c.len_utf16()).unwrap_or(2)).sum()
}

/// Byte index of a UTF-16 position, rounded down to a char boundary.
fn byte_index(text: &str, units: u32) -> usize {
    let target = units as usize;
    let mut seen = 0usize;
    for (idx, ch) in text.char_indices() {
        if seen + ch.len_utf16() > target {
            return idx;
        }
        seen += ch.len_utf16();
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len16(text: &str) -> u32 {
        u32::try_from(text.encode_utf16().count()).unwrap()
    }

    #[test]
    fn bold_wraps_selection_and_parks_caret_after() {
        let edit = MarkdownAction::Bold.apply("hello world", 0, 5);
        assert_eq!(edit.text, "**hello** world");
        assert_eq!(edit.caret, 9);
    }

    #[test]
    fn empty_selection_inserts_placeholder_inside_markers() {
        let bold = MarkdownAction::Bold.apply("", 0, 0);
        assert_eq!(bold.text, "**текст**");
        assert_eq!(bold.caret, len16("**текст**") - 2);

        let italic = MarkdownAction::Italic.apply("ab", 1, 1);
        assert_eq!(italic.text, "a*текст*b");
        assert_eq!(italic.caret, 1 + len16("*текст*") - 1);
    }

    #[test]
    fn heading_caret_lands_before_placeholder() {
        let edit = MarkdownAction::Heading.apply("", 0, 0);
        assert_eq!(edit.text, "## Заголовок");
        assert_eq!(edit.caret, 3);

        let titled = MarkdownAction::Heading.apply("Intro", 0, 5);
        assert_eq!(titled.text, "## Intro");
        assert_eq!(titled.caret, 8);
    }

    #[test]
    fn link_offsets_depend_on_selection() {
        let named = MarkdownAction::Link.apply("see docs", 4, 8);
        assert_eq!(named.text, "see [docs](url)");
        assert_eq!(named.caret, len16("see [docs](url)") - 5);

        let blank = MarkdownAction::Link.apply("", 0, 0);
        assert_eq!(blank.text, "[текст ссылки](url)");
        assert_eq!(blank.caret, len16("[текст ссылки](url)") - 15);
    }

    #[test]
    fn code_switches_to_fence_for_multiline() {
        let inline = MarkdownAction::Code.apply("x", 0, 1);
        assert_eq!(inline.text, "`x`");
        assert_eq!(inline.caret, 3);

        let empty = MarkdownAction::Code.apply("", 0, 0);
        assert_eq!(empty.text, "`код`");
        assert_eq!(empty.caret, 4);

        let block = MarkdownAction::Code.apply("a\nb", 0, 3);
        assert_eq!(block.text, "```\na\nb\n```");
        assert_eq!(block.caret, len16("```\na\nb\n```"));
    }

    #[test]
    fn list_and_quote_prefix_every_line() {
        let list = MarkdownAction::List.apply("a\nb\nc", 0, 5);
        assert_eq!(list.text, "- a\n- b\n- c");
        assert_eq!(list.caret, len16(&list.text));

        let quote = MarkdownAction::Quote.apply("x\ny", 0, 3);
        assert_eq!(quote.text, "> x\n> y");

        assert_eq!(MarkdownAction::List.apply("", 0, 0).text, "- Элемент списка");
        assert_eq!(MarkdownAction::Quote.apply("", 0, 0).text, "> Цитата");
    }

    #[test]
    fn line_prefixing_preserves_line_count_and_strips_back() {
        let original = "first\n\nthird line\n  indented";
        for (action, prefix) in [(MarkdownAction::List, "- "), (MarkdownAction::Quote, "> ")] {
            let edit = action.apply(original, 0, len16(original));
            let lines: Vec<&str> = edit.text.split('\n').collect();
            assert_eq!(lines.len(), original.split('\n').count());
            let restored: Vec<&str> = lines
                .iter()
                .map(|line| line.strip_prefix(prefix).unwrap())
                .collect();
            assert_eq!(restored.join("\n"), original);
        }
    }

    #[test]
    fn replaying_an_action_nests_instead_of_corrupting() {
        let first = MarkdownAction::Bold.apply("text", 0, 4);
        assert_eq!(first.text, "**text**");
        let second = MarkdownAction::Bold.apply(&first.text, 0, first.caret);
        assert_eq!(second.text, "****text****");

        for action in MarkdownAction::all() {
            let sample = "one two\nthree";
            let mut text = sample.to_string();
            let mut caret = 0;
            for _ in 0..3 {
                let edit = action.apply(&text, 0, caret.max(3));
                assert!(edit.caret <= len16(&edit.text), "{action:?}");
                assert!(edit.text.len() > text.len(), "{action:?}");
                text = edit.text;
                caret = edit.caret;
            }
        }
    }

    #[test]
    fn prefix_and_suffix_survive_every_action() {
        let text = "before MID after";
        for action in MarkdownAction::all() {
            for (start, end) in [(7, 10), (7, 7), (0, 0), (16, 16)] {
                let edit = action.apply(text, start, end);
                let start = start as usize;
                let end = end as usize;
                assert!(edit.text.starts_with(&text[..start]));
                assert!(edit.text.ends_with(&text[end..]));
                assert!(edit.caret as usize <= edit.text.encode_utf16().count());
            }
        }
    }

    #[test]
    fn positions_are_utf16_units() {
        let text = "😀 hi";
        let edit = MarkdownAction::Bold.apply(text, 3, 5);
        assert_eq!(edit.text, "😀 **hi**");
        assert_eq!(edit.caret, 9);
    }

    #[test]
    fn reversed_and_out_of_range_selections_are_clamped() {
        let reversed = MarkdownAction::Italic.apply("abc", 3, 1);
        assert_eq!(reversed.text, "a*bc*");
        let overflow = MarkdownAction::Italic.apply("abc", 2, 99);
        assert_eq!(overflow.text, "ab*c*");
        assert_eq!(overflow.caret, 5);
        let split_pair = MarkdownAction::Bold.apply("😀", 1, 1);
        assert_eq!(split_pair.text, "**текст**😀");
    }

    #[test]
    fn tab_inserts_fixed_indent() {
        let edit = indent("ab", 1, 1);
        assert_eq!(edit.text, "a    b");
        assert_eq!(edit.caret, 5);
        let replaced = indent("abcd", 1, 3);
        assert_eq!(replaced.text, "a    d");
        assert_eq!(replaced.caret, 5);
    }

    #[test]
    fn shortcuts_resolve_to_toolbar_actions() {
        assert_eq!(
            EditorCommand::from_key("b", true),
            Some(EditorCommand::Format(MarkdownAction::Bold))
        );
        assert_eq!(
            EditorCommand::from_key("i", true),
            Some(EditorCommand::Format(MarkdownAction::Italic))
        );
        assert_eq!(
            EditorCommand::from_key("k", true),
            Some(EditorCommand::Format(MarkdownAction::Link))
        );
        assert_eq!(EditorCommand::from_key("b", false), None);
        assert_eq!(EditorCommand::from_key("h", true), None);
        assert_eq!(EditorCommand::from_key("Tab", false), Some(EditorCommand::Indent));
        assert_eq!(EditorCommand::from_key("Backspace", true), None);
    }

    #[test]
    fn shortcut_and_button_produce_identical_edits() {
        let command = EditorCommand::from_key("k", true).unwrap();
        assert_eq!(
            command.apply("go here", 3, 7),
            MarkdownAction::Link.apply("go here", 3, 7)
        );
    }

    #[test]
    fn tags_parse_back_to_actions() {
        for action in MarkdownAction::all() {
            assert_eq!(action.tag().parse::<MarkdownAction>(), Ok(action));
        }
        assert_eq!(
            "strike".parse::<MarkdownAction>(),
            Err(UnknownAction("strike".into()))
        );
        assert_eq!(
            UnknownAction("strike".into()).to_string(),
            "unknown markdown action `strike`"
        );
    }

    #[test]
    fn preview_toggle_flips_label() {
        let mut preview = PreviewState::default();
        assert_eq!(preview.label_key(), "editor.preview");
        assert!(preview.toggle());
        assert!(preview.is_active());
        assert_eq!(preview.label_key(), "editor.edit");
        assert!(!preview.toggle());
    }
}
