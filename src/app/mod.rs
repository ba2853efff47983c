use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::scan::{ScanResults, load_scan_results};

mod classify;
mod gesture;
mod graph;
mod physics;
mod pulse;
mod render_utils;
mod tooltip;
mod topology;
mod ui;

use physics::SimulationConfig;
use topology::TopologyView;

const RESIZE_TOLERANCE: f32 = 0.5;

pub struct TopologyApp {
    scan_path: PathBuf,
    fullscreen: bool,
    state: AppState,
    reload_rx: Option<Receiver<Result<ScanResults, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ScanResults, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    results: ScanResults,
    topology: Option<TopologyView>,
    config: SimulationConfig,
    fullscreen: bool,
    graph_dirty: bool,
}

impl ViewModel {
    fn ensure_topology(&mut self, size: Vec2, now: f64) {
        let resized = self
            .topology
            .as_ref()
            .is_some_and(|view| (view.size() - size).abs().max_elem() > RESIZE_TOLERANCE);
        if !self.graph_dirty && !resized {
            return;
        }

        if resized {
            tracing::info!(width = size.x, height = size.y, "canvas resized, rebuilding topology");
        }
        self.rebuild_topology(size, now);
    }

    // Returns the torn-down view that was replaced, if any.
    fn rebuild_topology(&mut self, size: Vec2, now: f64) -> Option<TopologyView> {
        let mut previous = self.topology.take();
        if let Some(view) = previous.as_mut() {
            view.teardown();
        }
        self.graph_dirty = false;

        match self.results.graph_hosts() {
            Some(hosts) => self.topology = TopologyView::build(hosts, size, now, self.config),
            None => tracing::warn!("scan results contain no hosts, nothing to lay out"),
        }
        previous
    }
}

impl TopologyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, scan_path: PathBuf, fullscreen: bool) -> Self {
        let state = Self::start_load(scan_path.clone());
        Self {
            scan_path,
            fullscreen,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(scan_path: PathBuf) -> Receiver<Result<ScanResults, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_scan_results(&scan_path).map_err(|error| {
                tracing::warn!(path = %scan_path.display(), "failed to load scan results: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(scan_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(scan_path),
        }
    }

    fn ready(&self, results: ScanResults) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(results, self.fullscreen)))
    }
}

impl eframe::App for TopologyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading scan results...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load scan results");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(self.scan_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.scan_path, &mut reload_requested, is_reloading);
                self.fullscreen = model.fullscreen;

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.scan_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(results) => self.ready(results),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
