//! Native Gantt chart window
//!
//! Draws a [`ChartLayout`] with egui_plot: one horizontal bar chart per
//! stage, legend in the lower-right corner, bounds pinned to the layout.

use eframe::egui;
use egui_plot::{Bar, BarChart, Corner, Legend, Plot, PlotBounds};

use crate::chart::ChartLayout;
use crate::config::GanttConfig;

pub fn show(layout: ChartLayout, config: &GanttConfig) -> anyhow::Result<()> {
    let title = format!("cu-gantt: {}", layout.title);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title(title.clone()),
        ..Default::default()
    };
    let dark_mode = config.dark_mode;

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let visuals = if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            };
            cc.egui_ctx.set_visuals(visuals);
            Ok(Box::new(GanttViewer::new(layout)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

struct GanttViewer {
    layout: ChartLayout,
    /// Re-pin the plot bounds on the next frame
    reset_bounds: bool,
}

impl GanttViewer {
    fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            reset_bounds: true,
        }
    }

    fn bar_charts(&self) -> Vec<BarChart> {
        self.layout
            .layers
            .iter()
            .map(|layer| {
                let [r, g, b] = layer.color;
                let color = egui::Color32::from_rgb(r, g, b);
                let bars = layer
                    .bars
                    .iter()
                    .map(|&(commit_id, cycle)| {
                        Bar::new(commit_id as f64, cycle as f64)
                            .width(self.layout.bar_height)
                            .fill(color)
                            .stroke(egui::Stroke::NONE)
                    })
                    .collect();
                // Empty name keeps the layer out of the legend
                let name = layer.label.map(|s| s.to_string()).unwrap_or_default();
                BarChart::new(bars).horizontal().color(color).name(name)
            })
            .collect()
    }
}

impl eframe::App for GanttViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.layout.title);
                ui.separator();
                if ui.button("Reset view").clicked() {
                    self.reset_bounds = true;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let bounds = self.layout.bounds;
            let reset = std::mem::take(&mut self.reset_bounds);
            let charts = self.bar_charts();

            Plot::new("gantt")
                .legend(Legend::default().position(Corner::RightBottom))
                .x_axis_label("cycle")
                .y_axis_label("commit id")
                .show(ui, |plot_ui| {
                    for chart in charts {
                        plot_ui.bar_chart(chart);
                    }
                    if reset {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [bounds.x_min, bounds.y_min],
                            [bounds.x_max, bounds.y_max],
                        ));
                    }
                });
        });
    }
}
