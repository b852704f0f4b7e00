use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Default)]
pub struct Loading {
    tick: usize,
}

impl Loading {
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn text(&self, topic: &str) -> String {
        let spinner = SPINNER[self.tick % SPINNER.len()];
        if topic.is_empty() {
            return format!("{spinner} Writing your questions...");
        }

        return format!("{spinner} Writing questions about {topic}...");
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, topic: &str) {
        frame.render_widget(
            Paragraph::new(self.text(topic))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            rect,
        );
    }
}
