use ratatui::{
    layout::Alignment,
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

/// Alternative keys for one action, and a short description of it.
pub(crate) type KeyBinding<'a> = (&'a [&'a str], &'a str);

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Help for key bindings: one binding per line, or all on one line.
#[derive(Debug)]
pub(crate) struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    single_line: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            single_line: false,
            block: None,
        }
    }

    pub fn single_line(self) -> Self {
        Self {
            single_line: true,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        let lines = if self.single_line {
            1
        } else {
            self.bindings.len() as u16
        };
        lines + super::block_vertical_margin(self.block.as_ref())
    }
}

fn binding_spans<'a>((keys, desc): KeyBinding<'a>) -> Vec<Span<'a>> {
    let mut spans = vec![];
    for (i, key) in keys.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
        }
        spans.push(Span::styled(key, KEY_STYLE));
    }
    spans.push(Span::from(" "));
    spans.push(Span::styled(desc, DESCRIPTION_STYLE));
    spans
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let text = if self.single_line {
            let mut spans = vec![];
            for (i, binding) in self.bindings.iter().copied().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
                }
                spans.extend(binding_spans(binding));
            }
            Text::from(Line::from(spans)).alignment(Alignment::Center)
        } else {
            self.bindings
                .iter()
                .copied()
                .map(|binding| Line::from(binding_spans(binding)))
                .collect::<Text>()
        };
        Paragraph::new(text).render(area, buf);
    }
}
