pub mod rest;
pub mod state;

// Re-export the main handler to make it easily accessible
// to the binary that will build the web server router.
pub use rest::generate_lesson_handler;
