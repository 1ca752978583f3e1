//! Key and command reference overlay

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;

const KEYS: &[(&str, &str)] = &[
    ("j / k", "Descer / subir"),
    ("h / l", "Painel à esquerda / direita"),
    ("Tab", "Próximo painel"),
    ("Enter", "Abrir aula ou capítulo"),
    ("g / G", "Início / fim"),
    ("Ctrl-d / Ctrl-u", "Meia página"),
    ("[ ou 1", "Mostrar / ocultar índice"),
    ("c, ] ou 3", "Mostrar / ocultar tutor"),
    ("/ , n , N", "Buscar, próxima, anterior"),
    ("t", "Alternar tema"),
    ("y", "Copiar exemplo [1] ou link da página"),
    ("q", "Sair"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":goto <id>", "Abrir tópico pelo id"),
    (":ask <pergunta>", "Perguntar ao tutor"),
    (":theme [light|dark]", "Trocar tema"),
    (":key <chave>", "Guardar chave da API"),
    (":model [nome]", "Ver ou trocar modelo"),
    (":yank [n]", "Copiar exemplo [n] ou n-ésima referência"),
    (":q", "Sair"),
];

/// Draw the help overlay on top of `area`
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Ajuda ")
        .title_bottom(Line::from(" Esc ou ? fecha ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);
    frame.render_widget(Paragraph::new(help_lines(theme)), inner);
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = section("Teclas", KEYS, theme);
    lines.push(Line::from(""));
    lines.extend(section("Comandos", COMMANDS, theme));
    lines
}

fn section(title: &'static str, entries: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    ))];
    for (key, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<22}", key), Style::default().fg(theme.accent_secondary)),
            Span::styled(*description, Style::default().fg(theme.fg_primary)),
        ]));
    }
    lines
}

/// Create a centered rectangle with the given percentage of width and height
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
