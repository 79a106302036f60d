// Module exports for pure logic
pub mod tabs;          // Tab list state machine
pub mod events;        // Update notifications
pub mod drag;          // Drag-reorder resolution
pub mod breadcrumbs;   // Breadcrumb chain + content path
pub mod file_types;    // Label classification
