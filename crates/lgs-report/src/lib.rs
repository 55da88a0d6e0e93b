//! lgs-report: HTML panels for the LGS score dashboard.

pub mod html;

pub use html::{
    render_page, render_raw_json, render_recommendation, render_results, render_subject_chart,
    render_summary, write_html,
};
