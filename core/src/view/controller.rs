use crate::config::DashboardConfig;
use crate::dataset::DatasetSynthesizer;
use crate::kpi::{KpiComputer, KpiDisplay};
use crate::prelude::{DashboardError, DashboardResult};
use crate::sampling::RandomSampler;
use crate::telemetry::{LogManager, MetricsSnapshot, TransitionMetrics};
use crate::view::form::FormAdapter;
use crate::view::render::{
    ChartDescription, ChartRenderer, ChartSlotKind, ComboChart, HeatmapSurface, ScatterChart,
};
use crate::view::slot::ChartSlot;
use crate::view::state::{Command, ViewState};

/// Number of busiest hours surfaced next to the KPIs.
pub const PEAK_HOURS: usize = 3;

/// Two-state machine that owns the three chart slots and the KPI fields.
///
/// A freshly constructed controller is `EMPTY` with nothing rendered; call
/// [`ViewStateController::boot`] to paint the initial zero state. Every
/// transition re-renders all three artifacts and all four KPI fields. A
/// failing slot does not stop the others; the first failure is returned once
/// the transition has finished and whatever was applied stays applied.
pub struct ViewStateController<R, F, S> {
    state: ViewState,
    config: DashboardConfig,
    renderer: R,
    form: F,
    synthesizer: DatasetSynthesizer<S>,
    hourly: ChartSlot,
    scatter: ChartSlot,
    heatmap: ChartSlot,
    kpis: KpiDisplay,
    peak_hours: Vec<u8>,
    logger: LogManager,
    metrics: TransitionMetrics,
}

impl<R, F, S> ViewStateController<R, F, S>
where
    R: ChartRenderer,
    F: FormAdapter,
    S: RandomSampler,
{
    pub fn new(renderer: R, form: F, sampler: S, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            state: ViewState::Empty,
            config,
            renderer,
            form,
            synthesizer: DatasetSynthesizer::new(sampler),
            hourly: ChartSlot::new(ChartSlotKind::Hourly),
            scatter: ChartSlot::new(ChartSlotKind::Scatter),
            heatmap: ChartSlot::new(ChartSlotKind::Heatmap),
            kpis: KpiDisplay::zero(),
            peak_hours: Vec::new(),
            logger: LogManager::new("view"),
            metrics: TransitionMetrics::new(),
        })
    }

    /// Blank filters and zero visuals, the same as a `Reset`.
    pub fn boot(&mut self) -> DashboardResult<()> {
        self.logger.record("booting dashboard");
        self.reset()
    }

    pub fn apply(&mut self, command: Command) -> DashboardResult<()> {
        match command {
            Command::Run => self.run(),
            Command::Reset => self.reset(),
        }
    }

    /// Any state -> `EMPTY`.
    pub fn reset(&mut self) -> DashboardResult<()> {
        self.metrics.record_reset();
        self.form.clear_filters();
        self.state = ViewState::Empty;
        self.kpis = KpiDisplay::zero();
        self.peak_hours.clear();

        let descriptions = [
            ChartDescription::Combo(ComboChart::empty()),
            ChartDescription::Scatter(ScatterChart::empty()),
            ChartDescription::Heatmap(HeatmapSurface::blank(
                self.config.heatmap_cols,
                self.config.heatmap_rows,
            )),
        ];
        let outcome = self.install_all(descriptions);
        self.logger.record("Reset -> EMPTY");
        outcome
    }

    /// Any state -> `POPULATED` with a freshly synthesized dataset.
    pub fn run(&mut self) -> DashboardResult<()> {
        self.metrics.record_run();
        let filters = self.form.read_filters();
        self.logger
            .trace_detail(&format!("filters captured, not applied: {:?}", filters));

        let dataset = self.synthesizer.synthesize(&self.config)?;
        let snapshot = KpiComputer::compute(&dataset.hourly)?;

        self.state = ViewState::Populated;
        self.kpis = KpiDisplay::from_snapshot(&snapshot);
        self.peak_hours = KpiComputer::peak_hours(&dataset.hourly, PEAK_HOURS)
            .iter()
            .map(|record| record.hour)
            .collect();

        let descriptions = [
            ChartDescription::Combo(ComboChart::from_records(&dataset.hourly)),
            ChartDescription::Scatter(ScatterChart::new(&dataset.scatter)),
            ChartDescription::Heatmap(HeatmapSurface::from_grid(&dataset.heatmap)),
        ];
        let outcome = self.install_all(descriptions);
        self.logger.record(&format!(
            "Run -> POPULATED: trips {} avg speed {} avg fare {} p95 {}",
            self.kpis.total_trips, self.kpis.avg_speed, self.kpis.avg_fare, self.kpis.p95_speed
        ));
        outcome
    }

    fn install_all(&mut self, descriptions: [ChartDescription; 3]) -> DashboardResult<()> {
        let mut first_failure: Option<DashboardError> = None;
        let slots = [&mut self.hourly, &mut self.scatter, &mut self.heatmap];

        for (slot, description) in slots.into_iter().zip(descriptions) {
            let kind = slot.kind();
            match slot.install(&mut self.renderer, description) {
                Ok(handle) => self
                    .logger
                    .trace_detail(&format!("{} slot -> handle {}", kind, handle.id())),
                Err(err) => {
                    self.logger
                        .warn(&format!("{} slot render aborted: {}", kind, err));
                    self.metrics.record_render_failure();
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn kpis(&self) -> &KpiDisplay {
        &self.kpis
    }

    /// Busiest hours of the current render, busiest first. Empty when `EMPTY`.
    pub fn peak_hours(&self) -> &[u8] {
        &self.peak_hours
    }

    pub fn slot(&self, kind: ChartSlotKind) -> &ChartSlot {
        match kind {
            ChartSlotKind::Hourly => &self.hourly,
            ChartSlotKind::Scatter => &self.scatter,
            ChartSlotKind::Heatmap => &self.heatmap,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renderer access for host-side settings; chart slots stay controller-owned.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::RngSampler;
    use crate::view::form::{FilterField, FormFields};
    use crate::view::memory::MemoryRenderer;
    use rand::rngs::StdRng;

    type TestController = ViewStateController<MemoryRenderer, FormFields, RngSampler<StdRng>>;

    fn controller(seed: u64) -> TestController {
        ViewStateController::new(
            MemoryRenderer::new(),
            FormFields::new(),
            RngSampler::seeded(seed),
            DashboardConfig::default(),
        )
        .unwrap()
    }

    fn assert_zero_view(ctl: &TestController) {
        assert_eq!(ctl.state(), ViewState::Empty);
        assert_eq!(ctl.kpis(), &KpiDisplay::zero());
        for kind in ChartSlotKind::ALL {
            assert_eq!(ctl.renderer().plotted_points(kind), 0);
            assert_eq!(ctl.renderer().live_count(kind), 1);
        }
        assert!(ctl.peak_hours().is_empty());
    }

    #[test]
    fn new_controller_is_empty_and_unrendered() {
        let ctl = controller(1);
        assert_eq!(ctl.state(), ViewState::Empty);
        assert_eq!(ctl.renderer().total_live(), 0);
        assert!(ctl.slot(ChartSlotKind::Hourly).live().is_none());
    }

    #[test]
    fn boot_run_reset_scenario() {
        let mut ctl = controller(2024);
        ctl.form_mut().set(FilterField::MinFare, "12");
        ctl.boot().unwrap();
        assert_zero_view(&ctl);
        assert_eq!(ctl.kpis().total_trips, "0");
        assert!(ctl.form().read_filters().is_blank());

        ctl.form_mut().set(FilterField::Hour, "8");
        ctl.apply(Command::Run).unwrap();
        assert_eq!(ctl.state(), ViewState::Populated);
        let total: u64 = ctl.kpis().total_trips.replace(',', "").parse().unwrap();
        assert!((6000..=13176).contains(&total));
        let avg_speed: f64 = ctl.kpis().avg_speed.parse().unwrap();
        assert!((20.0..=45.0).contains(&avg_speed));
        assert_eq!(ctl.kpis().avg_speed.split('.').nth(1).map(str::len), Some(1));
        assert_eq!(ctl.renderer().plotted_points(ChartSlotKind::Scatter), 120);
        assert_eq!(ctl.renderer().plotted_points(ChartSlotKind::Hourly), 24);
        assert_eq!(ctl.renderer().plotted_points(ChartSlotKind::Heatmap), 84);
        assert_eq!(ctl.peak_hours().len(), PEAK_HOURS);
        // Run reads the form but leaves it alone.
        assert_eq!(ctl.form().get(FilterField::Hour), "8");

        ctl.apply(Command::Reset).unwrap();
        assert_zero_view(&ctl);
        assert!(ctl.form().read_filters().is_blank());
    }

    #[test]
    fn reset_twice_is_idempotent() {
        let mut ctl = controller(3);
        ctl.run().unwrap();
        ctl.reset().unwrap();
        let first_kpis = ctl.kpis().clone();
        let first_descriptions: Vec<_> = ChartSlotKind::ALL
            .iter()
            .map(|&kind| ctl.renderer().description(kind).cloned())
            .collect();

        ctl.reset().unwrap();
        assert_zero_view(&ctl);
        assert_eq!(ctl.kpis(), &first_kpis);
        let second_descriptions: Vec<_> = ChartSlotKind::ALL
            .iter()
            .map(|&kind| ctl.renderer().description(kind).cloned())
            .collect();
        assert_eq!(first_descriptions, second_descriptions);
    }

    #[test]
    fn repeated_runs_keep_one_live_handle_per_slot() {
        let mut ctl = controller(4);
        for n in 1..=6 {
            ctl.run().unwrap();
            for kind in ChartSlotKind::ALL {
                assert_eq!(ctl.renderer().live_count(kind), 1);
                let stats = ctl.slot(kind).stats();
                assert_eq!(stats.created, n);
                assert_eq!(stats.disposed, n - 1);
            }
        }
        assert_eq!(ctl.renderer().total_live(), 3);
        assert_eq!(ctl.metrics().runs, 6);
    }

    #[test]
    fn live_handle_matches_renderer_record() {
        let mut ctl = controller(5);
        ctl.boot().unwrap();
        let before = ctl.slot(ChartSlotKind::Scatter).live().map(|h| h.id());
        ctl.run().unwrap();
        let after = ctl.slot(ChartSlotKind::Scatter).live().map(|h| h.id());
        assert_ne!(before, after);
        assert_eq!(ctl.renderer().disposed(), 3);
        assert_eq!(ctl.renderer().created(), 6);
    }

    #[test]
    fn runs_produce_fresh_data_of_same_shape() {
        let mut ctl = controller(6);
        ctl.run().unwrap();
        let first = ctl.renderer().description(ChartSlotKind::Scatter).cloned();
        ctl.run().unwrap();
        let second = ctl.renderer().description(ChartSlotKind::Scatter).cloned();
        assert_ne!(first, second);
        assert_eq!(ctl.renderer().plotted_points(ChartSlotKind::Scatter), 120);
    }

    #[test]
    fn unavailable_heatmap_surface_aborts_only_that_slot() {
        let mut ctl = controller(7);
        ctl.boot().unwrap();
        ctl.renderer_mut().set_surface_available(false);

        let err = ctl.run().unwrap_err();
        assert!(matches!(err, DashboardError::RenderTargetUnavailable(_)));
        assert_eq!(ctl.state(), ViewState::Populated);
        assert!(!ctl.kpis().is_zero());
        assert_eq!(ctl.renderer().plotted_points(ChartSlotKind::Scatter), 120);
        assert!(ctl.slot(ChartSlotKind::Heatmap).live().is_none());
        assert_eq!(ctl.renderer().live_count(ChartSlotKind::Heatmap), 0);
        assert_eq!(ctl.metrics().render_failures, 1);

        ctl.renderer_mut().set_surface_available(true);
        ctl.reset().unwrap();
        assert_zero_view(&ctl);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DashboardConfig {
            heatmap_cols: 0,
            ..Default::default()
        };
        assert!(ViewStateController::new(
            MemoryRenderer::new(),
            FormFields::new(),
            RngSampler::seeded(0),
            config
        )
        .is_err());
    }
}
