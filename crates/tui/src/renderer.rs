use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line, Map, MapResolution, Points},
    },
};
use trackmap_core::TrackMapOptions;
use trackmap_core::viewport::{MapWidget, ViewportSync};
use trackmap_protocol::{Bounds, TrackMapView};

use crate::host::MemoryHost;
use crate::map::TerminalMap;

/// Option colors are CSS strings; anything unparseable draws white.
fn css_color(css: &str) -> Color {
    trackmap_protocol::Color::parse_css(css).map_or(Color::White, |c| {
        let (r, g, b) = c.to_rgb8();
        Color::Rgb(r, g, b)
    })
}

fn draw_layers(ctx: &mut Context<'_>, view: &TrackMapView) {
    if let Some(hexbin) = &view.hexbin {
        let coords: Vec<(f64, f64)> = hexbin
            .data
            .features
            .iter()
            .map(|f| (f.geometry.coordinates[0], f.geometry.coordinates[1]))
            .collect();
        ctx.draw(&Points {
            coords: &coords,
            color: css_color(&hexbin.options.color_range[1]),
        });
    }

    if let Some(heat) = &view.heatmap {
        let coords: Vec<(f64, f64)> = heat.points.iter().map(|p| (p.lon(), p.lat())).collect();
        ctx.draw(&Points {
            coords: &coords,
            color: Color::LightRed,
        });
    }

    if let Some(ant) = &view.ant_paths {
        for path in &ant.paths {
            let color = if path.options.paused {
                Color::DarkGray
            } else {
                css_color(&path.options.color)
            };
            for pair in path.positions.windows(2) {
                ctx.draw(&Line {
                    x1: pair[0][1],
                    y1: pair[0][0],
                    x2: pair[1][1],
                    y2: pair[1][0],
                    color,
                });
            }
        }
    }

    if let Some(markers) = &view.markers {
        ctx.layer();
        for m in &markers.markers {
            let symbol = if m.is_last { "●" } else { "·" };
            ctx.print(
                m.position.lon,
                m.position.lat,
                Span::styled(symbol, Style::default().fg(css_color(&m.color))),
            );
        }
    }
}

fn status_line(view: &TrackMapView, visible: &Bounds, host: &MemoryHost) -> String {
    if view.no_data {
        return " no data | ←↑↓→ pan | +/- zoom | q quit ".to_string();
    }
    let vars: Vec<String> = host
        .vars()
        .map(|(k, v)| format!("{}={v:.4}", k.trim_start_matches("var-")))
        .collect();
    format!(
        " [{:.3}, {:.3}] - [{:.3}, {:.3}] | {} | ←↑↓→ pan | +/- zoom | q quit ",
        visible.min_lat,
        visible.min_lon,
        visible.max_lat,
        visible.max_lon,
        vars.join(" "),
    )
}

pub fn render_tui(view: &TrackMapView, options: &TrackMapOptions) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut map = TerminalMap::new(
        view.map.center,
        view.map.zoom,
        size.width,
        size.height.saturating_sub(1),
    );
    let mut host = MemoryHost::default();
    let sync = ViewportSync::new(options.publish_bounds_to_host);
    if sync.fit_to_data(&mut map, &mut host, view.fit_bounds).is_none() {
        sync.on_move_end(&mut map, &mut host);
    }

    let title = format!(
        " trackmap | {} ",
        options
            .view_types
            .iter()
            .map(|v| format!("{v:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    );

    loop {
        let visible = map.visible_bounds();
        let status = status_line(view, &visible, &host);

        terminal.draw(|frame| {
            let area = frame.area();
            let map_area = Rect::new(0, 0, area.width, area.height.saturating_sub(1));
            let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);

            let canvas = Canvas::default()
                .block(Block::default().borders(Borders::ALL).title(title.as_str()))
                .marker(symbols::Marker::Braille)
                .x_bounds([visible.min_lon, visible.max_lon])
                .y_bounds([visible.min_lat, visible.max_lat])
                .paint(|ctx| {
                    ctx.draw(&Map {
                        resolution: MapResolution::High,
                        color: Color::DarkGray,
                    });
                    draw_layers(ctx, view);
                });
            frame.render_widget(canvas, map_area);
            frame.render_widget(
                Paragraph::new(status.as_str())
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                status_area,
            );
        })?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let moved = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left => {
                    map.pan(0.0, -1.0);
                    true
                }
                KeyCode::Right => {
                    map.pan(0.0, 1.0);
                    true
                }
                KeyCode::Up => {
                    map.pan(1.0, 0.0);
                    true
                }
                KeyCode::Down => {
                    map.pan(-1.0, 0.0);
                    true
                }
                KeyCode::Char('+' | '=') => {
                    map.zoom_by(1.0);
                    true
                }
                KeyCode::Char('-') => {
                    map.zoom_by(-1.0);
                    true
                }
                _ => false,
            },
            Event::Resize(cols, rows) => {
                map.resized(cols, rows.saturating_sub(1));
                true
            }
            _ => false,
        };
        if moved {
            sync.on_move_end(&mut map, &mut host);
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
