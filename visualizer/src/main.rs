use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, pick_list, row, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Pixels, Point, Rectangle, Renderer, Size, Task, Theme,
};
use std::collections::BTreeMap;
use tripcore::dataset::synth::{DISTANCE_RANGE, TIP_PERCENT_RANGE};
use tripcore::prelude::DashboardResult;
use tripcore::sampling::DefaultSampler;
use tripcore::view::{
    ChartDescription, ChartHandle, ChartRenderer, ChartSlotKind, ComboChart, FilterField,
    FormFields, HeatmapSurface, HourFilter, ScatterChart,
};
use tripcore::{DashboardConfig, ViewStateController};

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Dashboard) -> String {
    "Trip Analytics Dashboard".into()
}

fn application_theme(_: &Dashboard) -> Theme {
    Theme::Dark
}

type Controller = ViewStateController<CanvasRenderer, FormFields, DefaultSampler>;

/// Keeps the description behind every live handle so the canvases can paint
/// whatever the controller installed last.
#[derive(Default)]
struct CanvasRenderer {
    next_id: u64,
    live: BTreeMap<u64, (ChartSlotKind, ChartDescription)>,
}

impl CanvasRenderer {
    fn current(&self, slot: ChartSlotKind) -> Option<&ChartDescription> {
        self.live
            .values()
            .find(|(kind, _)| *kind == slot)
            .map(|(_, description)| description)
    }
}

impl ChartRenderer for CanvasRenderer {
    fn create(
        &mut self,
        slot: ChartSlotKind,
        description: ChartDescription,
    ) -> DashboardResult<ChartHandle> {
        self.next_id += 1;
        self.live.insert(self.next_id, (slot, description));
        Ok(ChartHandle::new(self.next_id, slot))
    }

    fn dispose(&mut self, handle: ChartHandle) {
        self.live.remove(&handle.id());
    }
}

struct Dashboard {
    controller: Option<Controller>,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Run,
    Reset,
    FilterChanged(FilterField, String),
    HourSelected(HourFilter),
}

impl Dashboard {
    fn boot() -> (Self, Task<Message>) {
        let built = ViewStateController::new(
            CanvasRenderer::default(),
            FormFields::new(),
            DefaultSampler::from_entropy(),
            DashboardConfig::default(),
        )
        .and_then(|mut controller| controller.boot().map(|()| controller));

        let dashboard = match built {
            Ok(controller) => Dashboard {
                controller: Some(controller),
                status: "No data - press Run to generate demo".into(),
            },
            Err(err) => Dashboard {
                controller: None,
                status: format!("Dashboard unavailable: {err}"),
            },
        };
        (dashboard, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        let Some(controller) = state.controller.as_mut() else {
            return Task::none();
        };
        match message {
            Message::Run => {
                state.status = match controller.run() {
                    Ok(()) => format!(
                        "Demo data generated, peak hours {}",
                        controller
                            .peak_hours()
                            .iter()
                            .map(|hour| format!("{hour}:00"))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    Err(err) => format!("Run incomplete: {err}"),
                };
            }
            Message::Reset => {
                state.status = match controller.reset() {
                    Ok(()) => "Filters cleared".into(),
                    Err(err) => format!("Reset incomplete: {err}"),
                };
            }
            Message::FilterChanged(field, value) => controller.form_mut().set(field, value),
            Message::HourSelected(hour) => {
                let raw = match hour {
                    HourFilter::All => String::new(),
                    HourFilter::Hour(hour) => hour.to_string(),
                };
                controller.form_mut().set(FilterField::Hour, raw);
            }
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let Some(controller) = state.controller.as_ref() else {
            return Container::new(text(&state.status).size(18))
                .padding(20)
                .into();
        };
        let form = controller.form();

        let filter_column = column![
            text("Filters").size(26),
            text_input("From (YYYY-MM-DD)", form.get(FilterField::From))
                .on_input(|value| Message::FilterChanged(FilterField::From, value))
                .padding(6),
            text_input("To (YYYY-MM-DD)", form.get(FilterField::To))
                .on_input(|value| Message::FilterChanged(FilterField::To, value))
                .padding(6),
            pick_list(
                HourFilter::options(),
                Some(HourFilter::parse(form.get(FilterField::Hour))),
                Message::HourSelected,
            )
            .padding(6),
            text_input("Min fare", form.get(FilterField::MinFare))
                .on_input(|value| Message::FilterChanged(FilterField::MinFare, value))
                .padding(6),
            text_input("Max fare", form.get(FilterField::MaxFare))
                .on_input(|value| Message::FilterChanged(FilterField::MaxFare, value))
                .padding(6),
            row![
                button("Run").on_press(Message::Run).padding(10),
                button("Reset").on_press(Message::Reset).padding(10),
            ]
            .spacing(10),
            text(&state.status).size(14),
            text("Filters are shown for reference; the demo data ignores them.").size(12),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(300.0));

        let kpis = controller.kpis();
        let kpi_row = row![
            kpi_card("Total trips", &kpis.total_trips),
            kpi_card("Avg speed (km/h)", &kpis.avg_speed),
            kpi_card("Avg fare", &kpis.avg_fare),
            kpi_card("P95 speed (km/h)", &kpis.p95_speed),
        ]
        .spacing(16);

        let renderer = controller.renderer();
        let hourly = match renderer.current(ChartSlotKind::Hourly) {
            Some(ChartDescription::Combo(chart)) => Some(chart.clone()),
            _ => None,
        };
        let scatter = match renderer.current(ChartSlotKind::Scatter) {
            Some(ChartDescription::Scatter(chart)) => Some(chart.clone()),
            _ => None,
        };
        let heatmap = match renderer.current(ChartSlotKind::Heatmap) {
            Some(ChartDescription::Heatmap(surface)) => Some(surface.clone()),
            _ => None,
        };

        let charts_column = column![
            kpi_row,
            text("Trips and average speed by hour").size(18),
            Canvas::new(HourlyCanvas { chart: hourly })
                .width(Length::Fill)
                .height(Length::Fixed(220.0)),
            text("Tip % vs distance").size(18),
            Canvas::new(ScatterCanvas { chart: scatter })
                .width(Length::Fill)
                .height(Length::Fixed(220.0)),
            text("Pickup density").size(18),
            Canvas::new(HeatmapCanvas { surface: heatmap })
                .width(Length::Fill)
                .height(Length::Fixed(200.0)),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![filter_column, charts_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn kpi_card<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .push(text(label).size(12))
            .push(text(value).size(28))
            .spacing(4),
    )
    .padding(10)
    .width(Length::FillPortion(1))
    .into()
}

const BACKGROUND: Color = Color::from_rgb(0.07, 0.07, 0.08);
const GRID: Color = Color::from_rgb(0.17, 0.17, 0.17);
const AMBER: Color = Color::from_rgb(1.0, 0.79, 0.16);
const SKY: Color = Color::from_rgb(0.56, 0.79, 0.98);
const CAPTION: Color = Color::from_rgb(0.6, 0.63, 0.65);

fn caption(frame: &mut Frame, content: &str, position: Point) {
    frame.fill_text(canvas::Text {
        content: content.to_string(),
        position,
        color: CAPTION,
        size: Pixels(12.0),
        ..canvas::Text::default()
    });
}

struct HourlyCanvas {
    chart: Option<ComboChart>,
}

impl canvas::Program<Message> for HourlyCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let Some(chart) = &self.chart else {
            return vec![frame.into_geometry()];
        };
        let categories = chart.labels.len().max(1) as f32;
        let plot_height = bounds.height - 20.0;
        let slot_width = bounds.width / categories;
        let max_trips = chart.bars.values.iter().copied().max().unwrap_or(0).max(1) as f32;
        let max_speed = chart
            .line
            .values
            .iter()
            .cloned()
            .fold(0.0_f64, f64::max)
            .max(1.0) as f32;

        for (idx, &trips) in chart.bars.values.iter().enumerate() {
            let height = trips as f32 / max_trips * plot_height;
            frame.fill_rectangle(
                Point::new(idx as f32 * slot_width + 2.0, plot_height - height),
                Size::new((slot_width - 4.0).max(1.0), height),
                Color { a: 0.67, ..AMBER },
            );
        }

        if chart.line.values.len() > 1 {
            let path = Path::new(|builder| {
                for (idx, &speed) in chart.line.values.iter().enumerate() {
                    let x = idx as f32 * slot_width + slot_width / 2.0;
                    let y = plot_height - speed as f32 / max_speed * plot_height;
                    if idx == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });
            frame.stroke(&path, Stroke::default().with_width(2.0).with_color(SKY));
        }

        for (idx, label) in chart.labels.iter().enumerate().step_by(3) {
            caption(
                &mut frame,
                label,
                Point::new(idx as f32 * slot_width + 2.0, plot_height + 4.0),
            );
        }

        vec![frame.into_geometry()]
    }
}

struct ScatterCanvas {
    chart: Option<ScatterChart>,
}

impl canvas::Program<Message> for ScatterCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let margin = 24.0;
        let plot_width = bounds.width - margin * 2.0;
        let plot_height = bounds.height - margin * 2.0;
        let axes = Path::new(|builder| {
            builder.move_to(Point::new(margin, margin));
            builder.line_to(Point::new(margin, margin + plot_height));
            builder.line_to(Point::new(margin + plot_width, margin + plot_height));
        });
        frame.stroke(&axes, Stroke::default().with_color(GRID).with_width(1.0));

        let Some(chart) = &self.chart else {
            return vec![frame.into_geometry()];
        };
        caption(
            &mut frame,
            &chart.x_title,
            Point::new(margin + plot_width - 80.0, bounds.height - 16.0),
        );
        caption(&mut frame, &chart.y_title, Point::new(4.0, 4.0));

        let x_max = DISTANCE_RANGE.1 as f32;
        let y_max = TIP_PERCENT_RANGE.1 as f32;
        for point in &chart.points {
            let x = margin + point.x as f32 / x_max * plot_width;
            let y = margin + plot_height - point.y as f32 / y_max * plot_height;
            let marker = Path::new(|builder| builder.circle(Point::new(x, y), 3.0));
            frame.fill(&marker, AMBER);
        }

        vec![frame.into_geometry()]
    }
}

struct HeatmapCanvas {
    surface: Option<HeatmapSurface>,
}

impl canvas::Program<Message> for HeatmapCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let Some(surface) = &self.surface else {
            return vec![frame.into_geometry()];
        };
        let cell_width = bounds.width / surface.cols.max(1) as f32;
        let cell_height = bounds.height / surface.rows.max(1) as f32;

        if surface.cells.is_empty() {
            let grid = Path::new(|builder| {
                for col in 0..=surface.cols {
                    let x = col as f32 * cell_width;
                    builder.move_to(Point::new(x, 0.0));
                    builder.line_to(Point::new(x, bounds.height));
                }
                for row in 0..=surface.rows {
                    let y = row as f32 * cell_height;
                    builder.move_to(Point::new(0.0, y));
                    builder.line_to(Point::new(bounds.width, y));
                }
            });
            frame.stroke(&grid, Stroke::default().with_color(GRID).with_width(1.0));
        } else {
            for cell in &surface.cells {
                let [r, g, b] = cell.fill_rgb();
                frame.fill_rectangle(
                    Point::new(
                        cell.col as f32 * cell_width + 1.0,
                        cell.row as f32 * cell_height + 1.0,
                    ),
                    Size::new(cell_width - 2.0, cell_height - 2.0),
                    Color::from_rgba8(r, g, b, 0.9),
                );
            }
        }

        caption(
            &mut frame,
            surface.caption.text(),
            Point::new(10.0, bounds.height - 20.0),
        );
        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_renderer_holds_one_description_per_slot() {
        let mut controller = ViewStateController::new(
            CanvasRenderer::default(),
            FormFields::new(),
            DefaultSampler::seeded(12),
            DashboardConfig::default(),
        )
        .unwrap();
        controller.boot().unwrap();
        controller.run().unwrap();
        controller.run().unwrap();

        assert_eq!(controller.renderer().live.len(), 3);
        match controller.renderer().current(ChartSlotKind::Scatter) {
            Some(ChartDescription::Scatter(chart)) => assert_eq!(chart.points.len(), 120),
            other => panic!("unexpected scatter description: {other:?}"),
        }
    }
}
