//! Commit/placement strategies.

use crate::config::ToolSettings;
use crate::host::Document;
use crate::orientation::OrientationBasis;
use log::info;

/// What a commit materializes into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommitTarget {
    /// Draw the fitted patch plus normal and axis indicators.
    #[default]
    Geometry,
    /// Place one instance of a named prototype object, oriented by the
    /// basis frame.
    Prototype(String),
}

/// Materialize the oriented result.
///
/// Only called with a defined basis; session reset and the return to INIT
/// are the state machine's job.
pub fn materialize(
    document: &mut dyn Document,
    target: &CommitTarget,
    basis: &OrientationBasis,
    settings: &ToolSettings,
) {
    match target {
        CommitTarget::Prototype(name) => {
            info!("placing prototype '{name}'");
            document.place_instance(name, &basis.frame_transform());
        },
        CommitTarget::Geometry => {
            info!("committing plane patch");
            document.add_face(&basis.rect.corners);
            let length = settings.normal_length;
            document.add_line(basis.origin, basis.origin + basis.normal * length);
            document.add_line(basis.origin, basis.origin + basis.x_axis * length);
            document.add_line(basis.origin, basis.origin + basis.y_axis * length);
        },
    }
}
