// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine : contrôles (symbole, Start, Stop), ticker défilant, snapshot
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : List pour le ticker, Table pour le snapshot
// 3. Layout : découpage de l'espace en zones
// 4. Style : vert pour une hausse, rouge pour une baisse
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::feed::FeedView;
use crate::models::{Quote, Trend};

/// Dessine l'interface complète
///
/// La vue du flux est copiée une fois par frame (voir App::view_snapshot)
pub fn render(frame: &mut Frame, app: &App) {
    let view = app.view_snapshot();
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_controls(frame, app, chunks[1]);
    render_ticker(frame, &view, chunks[2]);
    render_snapshot(frame, &view, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Crée le layout principal
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Contrôles
            Constraint::Min(4),    // Ticker : tout le reste
            Constraint::Length(5), // Snapshot : en-tête + une ligne
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Style associé à une tendance
fn trend_style(trend: Trend) -> Style {
    match trend {
        Trend::Up => Style::default().fg(Color::Green),
        Trend::Down => Style::default().fg(Color::Red),
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyTicker ")
        .title_alignment(Alignment::Center);

    let status = match (app.feed().symbol(), app.feed().current_price()) {
        (Some(symbol), Some(price)) => Span::styled(
            format!("● LIVE (simulated)  {}  {:.2}", symbol, price),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled("○ Stopped", Style::default().fg(Color::Gray)),
    };

    let paragraph = Paragraph::new(Line::from(status))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Contrôles : champ symbole + boutons
// ============================================================================

/// Style d'un bouton selon qu'il est actif ou non
fn button_style(enabled: bool, color: Color) -> Style {
    if enabled {
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.is_in_input_mode();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Green) // Vert pour indiquer mode input
        } else {
            Style::default().fg(Color::Cyan)
        })
        .title(" Symbol ");

    let mut spans = vec![
        Span::styled(
            format!("{:<width$}", app.symbol_input, width = crate::app::MAX_SYMBOL_LEN),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];

    if editing {
        spans.push(Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    } else if app.symbol_input.trim().is_empty() {
        spans.push(Span::styled(
            format!(" (default: {})", app.effective_symbol()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled(" Start ", button_style(app.can_start(), Color::Green)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(" Stop ", button_style(app.can_stop(), Color::Red)));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Ticker : liste défilante
// ============================================================================

/// Lignes visibles du ticker : les plus récentes si la zone est trop petite
///
/// Les plus anciennes sont en haut, la plus récente en bas
pub fn visible_ticker(view: &FeedView, rows: usize) -> Vec<&Quote> {
    let skip = view.ticker_len().saturating_sub(rows);
    view.ticker().skip(skip).collect()
}

fn render_ticker(frame: &mut Frame, view: &FeedView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📈 Ticker ({}/{}) ", view.ticker_len(), view.capacity()));

    if view.ticker_len() == 0 {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucune cotation : appuyez sur [s] pour démarrer",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let rows = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = visible_ticker(view, rows)
        .into_iter()
        .map(|quote| {
            ListItem::new(format!(" {}", quote.ticker_line())).style(trend_style(quote.trend()))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// ============================================================================
// Snapshot : tableau d'une ligne
// ============================================================================

/// Cellules du snapshot : Symbol, Price, Change, Time
pub fn snapshot_cells(quote: &Quote) -> [String; 4] {
    [
        quote.symbol.clone(),
        quote.price_label(),
        quote.change_label(),
        quote.time_label(),
    ]
}

fn render_snapshot(frame: &mut Frame, view: &FeedView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Latest ");

    let header = Row::new(vec!["Symbol", "Price", "Change", "Time"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .snapshot()
        .map(|quote| {
            let [symbol, price, change, time] = snapshot_cells(quote);
            Row::new(vec![
                Cell::from(symbol),
                Cell::from(price),
                Cell::from(change).style(trend_style(quote.trend())),
                Cell::from(time),
            ])
        })
        .into_iter()
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_in_input_mode() {
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Confirm  "),
            Span::styled("[ESC]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[e]", key_style),
            Span::raw(" Edit symbol  "),
            Span::styled("[s]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Start  "),
            Span::styled("[x]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Stop"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Renderer;
    use chrono::{Local, TimeZone};

    fn quote(price: f64, change: f64) -> Quote {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Quote::new("AAPL".to_string(), price, change, ts)
    }

    #[test]
    fn test_visible_ticker_keeps_newest() {
        let mut view = FeedView::new(20);
        for i in 0..10 {
            view.on_quote(&quote(100.0 + i as f64, 1.0));
        }

        let visible = visible_ticker(&view, 4);
        let prices: Vec<f64> = visible.iter().map(|q| q.price).collect();
        assert_eq!(prices, vec![106.0, 107.0, 108.0, 109.0]);

        assert_eq!(visible_ticker(&view, 50).len(), 10);
    }

    #[test]
    fn test_snapshot_cells() {
        let cells = snapshot_cells(&quote(104.5, -0.25));
        assert_eq!(cells, [
            "AAPL".to_string(),
            "104.50".to_string(),
            "-0.25".to_string(),
            "09:30:00".to_string(),
        ]);
    }

    #[test]
    fn test_trend_style() {
        assert_eq!(trend_style(Trend::Up).fg, Some(Color::Green));
        assert_eq!(trend_style(Trend::Down).fg, Some(Color::Red));
    }
}
