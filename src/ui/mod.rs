pub mod diff_view;
pub mod docs_viewer;
pub mod playground;
pub mod run_panel;
pub mod viewport;
pub mod wizard_panel;
