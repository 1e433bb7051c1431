use crate::cards::{Card, Rank, Suit};
use crate::table::{Player, PlayerStatus};
use crate::tools::Actor;
use crate::transcript::{Entry, EntryKind};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const MAX_CARD_WIDGETS: usize = 7;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(9), // deck + seats
            Constraint::Min(5),    // transcript
            Constraint::Length(4), // command line
        ])
        .split(size);

    let session = &app.session;
    let header = Paragraph::new(Line::from(format!(
        "Acting: {}   Pot: ${}   Deck: {} live / {} discarded",
        session.active(),
        session.table().pot,
        session.deck().cards_remaining(),
        session.deck().cards_discarded(),
    )))
    .block(Block::default().title("holdem-dealer").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_deck(f, middle[0], app);
    draw_seats(f, middle[1], app);

    let lines_fit = chunks[2].height.saturating_sub(2) as usize;
    draw_transcript(f, chunks[2], &session.transcript().recent(lines_fit), "Transcript");

    draw_command_line(f, chunks[3], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_deck(f: &mut Frame, area: Rect, app: &AppState) {
    let deck = app.session.deck();
    let block = Block::default().title("Deck").borders(Borders::ALL);
    f.render_widget(block, area);
    let area_inner = inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area_inner);

    let info = vec![
        Line::from(format!(
            "Remaining: {}   Discarded: {}",
            deck.cards_remaining(),
            deck.cards_discarded()
        )),
        Line::from(Span::styled("Last dealt:", Style::default().add_modifier(Modifier::DIM))),
    ];
    f.render_widget(Paragraph::new(info), rows[0]);

    let dealt = app.session.last_dealt();
    if dealt.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("--", Style::default().add_modifier(Modifier::DIM))),
            rows[1],
        );
        return;
    }
    let shown = dealt.len().min(MAX_CARD_WIDGETS);
    let card_width = rows[1].width / MAX_CARD_WIDGETS as u16;
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            (0..MAX_CARD_WIDGETS).map(|_| Constraint::Length(card_width)).collect::<Vec<_>>(),
        )
        .split(rows[1]);
    for (i, card) in dealt.iter().take(shown).enumerate() {
        let extra = dealt.len() - shown;
        if i + 1 == shown && extra > 0 {
            let para = Paragraph::new(format!("+{}", extra + 1))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(para, card_chunks[i]);
        } else {
            render_card_widget(f, card_chunks[i], *card);
        }
    }
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let table = app.session.table();
    let active = app.session.active();
    let block = Block::default().title("Seats").borders(Borders::ALL);
    let rows: Vec<Row> = table
        .players
        .iter()
        .map(|p| {
            let acting =
                matches!(active, Actor::Player(name) if name.eq_ignore_ascii_case(&p.name));
            seat_row(p, acting)
        })
        .collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(5),
    ];
    let header = Row::new(vec!["Player", "Balance", "Bet", "Status", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widget = Table::new(rows, widths).header(header).block(block);
    f.render_widget(widget, area);
}

fn seat_row(p: &Player, acting: bool) -> Row<'static> {
    let status = match p.status {
        PlayerStatus::Active => "Active",
        PlayerStatus::Checked => "Checked",
        PlayerStatus::Folded => "Folded",
    };
    let mut style = Style::default();
    if p.is_folded() {
        style = style.fg(Color::DarkGray);
    } else if acting {
        style = style.fg(Color::Yellow);
    }
    Row::new(vec![
        p.name.clone(),
        format!("${}", p.balance),
        p.current_bet.to_string(),
        status.to_string(),
        if p.dealer_button { "[BTN]".to_string() } else { String::new() },
    ])
    .style(style)
}

fn entry_line(entry: &Entry) -> Line<'static> {
    let style = match entry.kind {
        EntryKind::ToolCall => Style::default().fg(Color::Cyan),
        EntryKind::ToolOutput => Style::default(),
        EntryKind::ToolError => Style::default().fg(Color::Red),
        EntryKind::AgentRunning => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        EntryKind::Message => Style::default().add_modifier(Modifier::ITALIC),
        EntryKind::Handoff => Style::default().fg(Color::Magenta),
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", entry.kind.label()), style.add_modifier(Modifier::DIM)),
        Span::styled(format!("{}: {}", entry.actor, entry.content), style),
    ])
}

fn draw_transcript(f: &mut Frame, area: Rect, entries: &[Entry], title: &str) {
    let lines: Vec<Line> = entries.iter().map(entry_line).collect();
    let para = Paragraph::new(lines)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &AppState) {
    let title = format!("Command ({})", app.active_actor());
    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::raw(app.input_text().to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ])];
    if let Some(err) = app.action_error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Tab actor • Enter run • ↑/↓ recall • F1 help • F2 history • Esc menu",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    let para =
        Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let entries = app
        .session
        .transcript()
        .recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    f.render_widget(Clear, area);
    if entries.is_empty() {
        let para = Paragraph::new("No history yet.")
            .block(Block::default().title("History").borders(Borders::ALL));
        f.render_widget(para, area);
        return;
    }
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    draw_transcript(f, parts[0], &entries, "History");
    f.render_widget(
        Paragraph::new(Span::styled(
            "Up/Down scroll • Close: F2 or Esc",
            Style::default().add_modifier(Modifier::DIM),
        )),
        parts[1],
    );
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Dealer commands:", bold)),
        Line::from("- shuffle: shuffle the live cards"),
        Line::from("- draw N: deal N cards from the top"),
        Line::from("- return: put dealt cards back under the deck"),
        Line::from("- reset: fresh, unshuffled 52-card deck"),
        Line::from("- status: cards remaining / discarded"),
        Line::from("- new hand: collect, shuffle, move the button"),
        Line::from("- award NAME: pay the pot to a player"),
        Line::from(""),
        Line::from(Span::styled("Player commands:", bold)),
        Line::from("- bet AMOUNT | check | fold"),
        Line::from("- table: show the table as JSON"),
        Line::from(""),
        Line::from(Span::styled("Keys:", bold)),
        Line::from("- Tab / Shift-Tab: switch acting player"),
        Line::from("- Enter: run command   Up/Down: recall"),
        Line::from("- F2: history   Esc: menu"),
        Line::from(""),
        Line::from("Close help: F1 or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn card_face(rank: Rank, suit: Suit) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(suit);
    Span::styled(format!("{}{}", rank.label(), glyph), style)
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Card) {
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan));
    let para = Paragraph::new(Line::from(card_face(card.rank(), card.suit())))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(para, area);
}
