use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use weather_core::{
    ForecastView, Modal, Section, WeatherView,
    view::{ForecastCard, InfoView},
};

use crate::app::{App, InputMode};

const MISSING: &str = "--";

fn bordered(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {title} "), Style::default().fg(Color::Yellow)))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(accent))
        .border_type(BorderType::Rounded)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn draw(f: &mut Frame, app: &App) {
    let [header, body, forecast, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Length(3),
    ])
    .margin(1)
    .areas(f.area());

    f.render_widget(headline(app), header);

    let view = app.controller.view();
    let [current, details] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    match &view.weather {
        Section::Ready(weather) => {
            f.render_widget(current_conditions(weather), current);
            f.render_widget(atmosphere(weather), details);
        }
        other => {
            let panel = section_placeholder(other, "weather data");
            f.render_widget(panel.block(bordered("Current Conditions", Color::Cyan)), current);
            f.render_widget(
                Paragraph::new(format!("\n  {MISSING}")).block(bordered("Details", Color::Cyan)),
                details,
            );
        }
    }

    match &view.forecast {
        Section::Ready(ForecastView::Cards(cards)) => f.render_widget(forecast_table(cards), forecast),
        Section::Ready(ForecastView::Unavailable) => f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!(" {}", ForecastView::UNAVAILABLE_TITLE),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(" {}", ForecastView::UNAVAILABLE_DETAIL)),
            ])
            .block(bordered("Forecast", Color::Cyan)),
            forecast,
        ),
        other => f.render_widget(
            section_placeholder(other, "forecast").block(bordered("Forecast", Color::Cyan)),
            forecast,
        ),
    }

    f.render_widget(footer_line(app), footer);

    match &view.modal {
        Some(Modal::Error { title, message }) => error_modal(f, title, message),
        Some(Modal::Info(info)) => info_modal(f, info),
        None => {}
    }
}

fn headline(app: &App) -> Paragraph<'_> {
    let prefs = app.controller.preferences();
    let mut first = vec![
        Span::raw(" "),
        Span::styled(prefs.city().to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(" : "),
        Span::styled(prefs.units().display_name(), Style::default().fg(Color::Blue)),
    ];
    if app.controller.is_loading() {
        first.push(Span::styled("  refreshing...", Style::default().fg(Color::DarkGray)));
    }
    if let Some(last) = &app.controller.view().last_update {
        first.push(Span::raw(format!("  {last}")));
    }

    let mut favorites = vec![Span::raw(" ")];
    for (i, city) in app.favorites.iter().enumerate() {
        favorites.push(Span::styled(format!("{} ", i + 1), Style::default().fg(Color::Green)));
        favorites.push(Span::raw(format!("{city}  ")));
    }

    Paragraph::new(vec![Line::from(first), Line::from(favorites)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn section_placeholder<'a, T>(section: &'a Section<T>, what: &str) -> Paragraph<'a> {
    let lines = match section {
        Section::Loading { city } => {
            vec![Line::from(""), Line::from(format!(" Loading {what} for {city}..."))]
        }
        Section::Failed { city, message } => vec![
            Line::from(""),
            Line::from(Span::styled(
                " Loading error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(" Unable to load {what} for {city}.")),
            Line::from(Span::styled(format!(" {message}"), Style::default().fg(Color::Red))),
        ],
        Section::Empty | Section::Ready(_) => vec![Line::from(format!("\n {MISSING}"))],
    };
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn value_row<'a>(label: &'a str, value: String) -> Row<'a> {
    Row::new(vec![
        Cell::from(format!(" {label}")),
        Cell::from(value).style(Style::default().fg(Color::Green)),
    ])
}

fn current_conditions(w: &WeatherView) -> Table<'_> {
    let accent = rgb(w.gradient.start_rgb());
    let mut rows = vec![
        Row::new(vec![Cell::from("")]),
        Row::new(vec![
            Cell::from(format!(" {}", w.location)).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(w.temperature.clone())
                .style(Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        ]),
        value_row("Conditions", w.description.clone()),
        value_row("Feels like", w.feels_like.clone()),
        value_row("Wind", format!("{} ({})", w.wind, w.wind_direction)),
        value_row("Humidity", w.humidity.clone()),
        value_row("Pressure", w.pressure.clone()),
        value_row("Sun", w.sun.clone()),
    ];
    if let Some(precipitation) = &w.precipitation {
        rows.push(value_row("Precip.", precipitation.clone()));
    }

    Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
        .block(bordered("Current Conditions", accent))
}

fn atmosphere(w: &WeatherView) -> Table<'_> {
    let rows = vec![
        Row::new(vec![Cell::from("")]),
        value_row("Temperature", w.temperature.clone()),
        value_row("Typical", w.typical_range.clone()),
        value_row("Visibility", w.visibility.as_str().to_string()),
        value_row("Country", w.country.clone()),
        value_row("Observed", w.observed_at.clone()),
        value_row("Units", w.units.clone()),
        value_row("Category", w.category.as_str().to_string()),
    ];

    Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
        .block(bordered("Details", rgb(w.gradient.end_rgb())))
}

fn forecast_table(cards: &[ForecastCard]) -> Table<'_> {
    let header = Row::new(
        ["Time", "Date", "Temp", "Conditions", "Feels", "Humidity", "Wind"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow))),
    );

    let rows = cards.iter().map(|c| {
        Row::new(vec![
            Cell::from(c.time.clone()),
            Cell::from(c.date.clone()),
            Cell::from(c.temperature.clone()).style(Style::default().fg(Color::Green)),
            Cell::from(c.description.clone()),
            Cell::from(c.feels_like.clone()),
            Cell::from(c.humidity.clone()),
            Cell::from(c.wind.clone().unwrap_or_else(|| MISSING.to_string())),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(bordered("Forecast", Color::Cyan))
}

fn footer_line(app: &App) -> Paragraph<'_> {
    let line = match &app.input {
        InputMode::EditingCity(buffer) => {
            let mut spans = vec![
                Span::styled(" City: ", Style::default().fg(Color::Yellow)),
                Span::raw(buffer.clone()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ];
            if let Some(hint) = &app.hint {
                spans.push(Span::styled(format!("   {hint}"), Style::default().fg(Color::Red)));
            }
            Line::from(spans)
        }
        InputMode::Normal => Line::from(
            " r refresh  u units  / city  1-9 favourites  i info  q quit",
        ),
    };

    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn error_modal(f: &mut Frame, title: &str, message: &str) {
    let area = centered(f.area(), 60, 8);
    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {title}"), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(" Details: {message}")),
        Line::from(""),
        Line::from(Span::styled(" [Enter] OK", Style::default().fg(Color::DarkGray))),
    ])
    .wrap(Wrap { trim: false })
    .block(bordered("Error", Color::Red));

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn info_modal(f: &mut Frame, info: &InfoView) {
    let mut lines = vec![
        Line::from(""),
        Line::from(format!(" Backend: {}", info.base_url)),
        Line::from(format!(" Auto-refresh: every {}", info.refresh_every)),
        Line::from(""),
    ];
    for (path, what) in &info.endpoints {
        lines.push(Line::from(vec![
            Span::styled(format!(" {path}"), Style::default().fg(Color::Green)),
            Span::raw(format!("  {what}")),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" [Esc] close", Style::default().fg(Color::DarkGray))));

    let area = centered(f.area(), 64, lines.len() as u16 + 2);
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(bordered("API", Color::Cyan)), area);
}
