/// egui rendering of the application state.
///
/// * `panels` – menu bar and the filter sidebar
/// * `dashboard` – central panel: data table and the eight charts
/// * `table` – read-only view of the filtered tracks
pub mod dashboard;
pub mod panels;
pub mod table;
