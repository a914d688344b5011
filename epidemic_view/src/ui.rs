// ui.rs - Controls, grid painting and census line for the viewer

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use epidemic::Cell;

use crate::{EpidemicView, POLICY_CHOICES};

impl eframe::App for EpidemicView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-advance if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Epidemic Automaton");

            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Reseed").clicked() {
                    self.is_running = false;
                    self.reseed();
                }

                ui.separator();

                ui.label("Policy:");
                egui::ComboBox::from_id_source("policy_selector")
                    .selected_text(POLICY_CHOICES[self.selected_policy].0)
                    .show_ui(ui, |ui| {
                        for (i, (name, _)) in POLICY_CHOICES.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_policy, i, *name);
                        }
                    });

                ui.separator();

                ui.label(format!("Day: {}", self.simulation().day_count()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Healthy:");
                ui.color_edit_button_srgba(&mut self.healthy_color);
                ui.label("Infected:");
                ui.color_edit_button_srgba(&mut self.infected_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click a cell to infect it while paused.");

            ui.separator();

            let grid = self.simulation().generation();
            let (rows, columns) = (grid.rows(), grid.columns());
            let spacing = 0.5;
            let box_size = (750.0 / rows.max(columns) as f32 - spacing).max(1.0);

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * columns as f32 - spacing,
                (box_size + spacing) * rows as f32 - spacing,
            );

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            let mut clicked = None;
            for (row, col, cell) in grid.iter_cells() {
                let x = start_pos.x + col as f32 * (box_size + spacing);
                let y = start_pos.y + row as f32 * (box_size + spacing);
                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                painter.rect_filled(rect, 1.0, self.cell_color(cell));
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                if !self.is_running && response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        if rect.contains(pos) {
                            clicked = Some((row, col));
                        }
                    }
                }
            }
            if let Some((row, col)) = clicked {
                self.infect_cell(row, col);
            }

            ui.separator();

            // Census of the current generation, not the consumed one
            let grid = self.simulation().generation();
            let total = grid.len() as f32;
            let healthy = grid.count(Cell::Healthy);
            let infected = grid.count(Cell::Infected) + grid.count(Cell::Spoiled);
            let dead = grid.count(Cell::Dead);

            ui.horizontal(|ui| {
                ui.label(format!("Healthy: {healthy}"));
                ui.label(format!("Infected: {infected}"));
                ui.label(format!("Dead: {dead}"));
                ui.label(format!("Surviving: {:.1}%", healthy as f32 / total * 100.0));
                ui.label(format!("Status: {:?}", self.simulation().status()));
                if let Some(policy) = self.last_policy {
                    ui.label(format!("Last step: regenerate={} delay={}", policy.regenerate, policy.delay));
                }
            });
        });

        if self.is_running {
            ctx.request_repaint();
        }
    }
}
