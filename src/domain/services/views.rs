#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use crate::domain::models::AnswerMark;
use crate::domain::models::QuizProgress;
use crate::domain::models::QuizResult;
use crate::domain::models::TopicInput;

fn bold() -> Style {
    return Style::default().add_modifier(Modifier::BOLD);
}

fn hint(text: &str) -> Line<'static> {
    return Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ));
}

fn cursor_prefix(selected: bool) -> &'static str {
    if selected {
        return "> ";
    }
    return "  ";
}

fn framed(title: &str) -> Block<'static> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(title.to_string())
        .padding(Padding::new(2, 2, 1, 1));
}

pub fn welcome_lines(topics: &[String], cursor: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Welcome to Quizmaster!", bold())),
        Line::from("Pick a topic and test your knowledge."),
        Line::from(""),
    ];

    for (idx, topic) in topics.iter().enumerate() {
        let selected = idx == cursor;
        let mut style = Style::default();
        if selected {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!("{}{topic}", cursor_prefix(selected)),
            style,
        )));
    }

    let custom_selected = cursor >= topics.len();
    let mut custom_style = Style::default();
    if custom_selected {
        custom_style = custom_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
    }
    lines.push(Line::from(Span::styled(
        format!("{}Your own topic (type below)", cursor_prefix(custom_selected)),
        custom_style,
    )));

    lines.push(Line::from(""));
    lines.push(hint("Up/Down to choose, Enter to start."));

    return lines;
}

fn answer_style(mark: AnswerMark, highlighted: bool) -> Style {
    match mark {
        AnswerMark::Unanswered => {
            if highlighted {
                return Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            return Style::default();
        }
        AnswerMark::Correct => {
            return Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD);
        }
        AnswerMark::Wrong => {
            return Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        }
        AnswerMark::Other => return Style::default().fg(Color::DarkGray),
    }
}

fn answer_suffix(mark: AnswerMark) -> &'static str {
    match mark {
        AnswerMark::Correct => return " ✓",
        AnswerMark::Wrong => return " ✗",
        AnswerMark::Unanswered | AnswerMark::Other => return "",
    }
}

pub fn game_lines(progress: &QuizProgress, cursor: usize) -> Vec<Line<'static>> {
    let question = progress.current_question();
    let marks = progress.answer_marks();
    let answered = progress.is_answered();

    let mut lines = vec![
        Line::from(Span::styled(question.text().to_string(), bold())),
        Line::from(""),
    ];

    for (idx, answer) in question.answers().iter().enumerate() {
        let highlighted = !answered && idx == cursor;
        lines.push(Line::from(Span::styled(
            format!(
                "{}{}. {answer}{}",
                cursor_prefix(highlighted),
                idx + 1,
                answer_suffix(marks[idx])
            ),
            answer_style(marks[idx], highlighted),
        )));
    }

    lines.push(Line::from(""));

    match progress.is_selection_correct() {
        None => {
            lines.push(hint("Press 1-4, or Up/Down and Enter to answer."));
        }
        Some(correct) => {
            if correct {
                lines.push(Line::from(Span::styled(
                    "Correct!",
                    Style::default().fg(Color::Green),
                )));
            } else {
                let correct_index = question.correct_index();
                lines.push(Line::from(Span::styled(
                    format!(
                        "Wrong, the answer was {}. {}",
                        correct_index + 1,
                        question.answers()[correct_index]
                    ),
                    Style::default().fg(Color::Red),
                )));
            }

            let mut next = "Next question";
            if progress.is_last_question() {
                next = "Finish";
            }
            lines.push(hint(&format!("Press Enter: {next}")));
        }
    }

    return lines;
}

pub fn result_lines(result: &QuizResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Quiz complete!", bold())),
        Line::from(""),
        Line::from(format!("{} / {}", result.score(), result.total())),
        Line::from(""),
        Line::from(Span::styled("Answers", bold())),
    ];

    for (idx, question) in result.questions().iter().enumerate() {
        lines.push(Line::from(format!(
            "{}. {} {}",
            idx + 1,
            question.text(),
            question.answers()[question.correct_index()]
        )));
    }

    lines.push(Line::from(""));
    lines.push(hint("Press Enter to try another topic."));

    return lines;
}

pub fn error_lines(message: &str) -> Vec<Line<'static>> {
    return vec![
        Line::from(Span::styled(
            "Something went wrong while writing your questions.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        hint("Press Enter to pick a topic again."),
    ];
}

pub fn render_welcome<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    topics: &[String],
    cursor: usize,
    custom_topic: &TopicInput,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(1), Constraint::Length(3)])
        .split(rect);

    frame.render_widget(
        Paragraph::new(welcome_lines(topics, cursor))
            .block(framed("Quizmaster"))
            .wrap(Wrap { trim: true }),
        layout[0],
    );
    frame.render_widget(custom_topic.widget(), layout[1]);
}

pub fn render_game<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    progress: &QuizProgress,
    cursor: usize,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(1)])
        .split(rect);

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(progress.progress_ratio().clamp(0.0, 1.0))
            .label(format!(
                "Question {} of {}",
                progress.question_number(),
                progress.total()
            )),
        layout[0],
    );

    frame.render_widget(
        Paragraph::new(game_lines(progress, cursor))
            .block(framed(&format!("Score: {}", progress.score())))
            .wrap(Wrap { trim: true }),
        layout[1],
    );
}

pub fn render_result<B: Backend>(frame: &mut Frame<B>, rect: Rect, result: &QuizResult) {
    frame.render_widget(
        Paragraph::new(result_lines(result))
            .block(framed("Results"))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        rect,
    );
}

pub fn render_error<B: Backend>(frame: &mut Frame<B>, rect: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(error_lines(message))
            .block(framed("Error"))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        rect,
    );
}
