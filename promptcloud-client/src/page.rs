//! Controls and display slots of the hosting page

use promptcloud_io::ImageSource;

/// Number of debug image slots on the page
pub const IMAGE_SLOTS: usize = 2;

/// The page the coordinator drives
///
/// Implementations use interior mutability; every method is called from the
/// coordinator's event context and must not block.
pub trait Page: Send + Sync {
    /// Enable or disable the instruction field and the submit control together
    fn set_input_enabled(&self, enabled: bool);

    fn set_busy(&self, busy: bool);

    fn set_instruction(&self, text: &str);

    /// Replace the example-instruction choices
    fn set_instruction_choices(&self, choices: &[String]);

    /// Switch the instruction field between free text and example selection
    fn set_free_text(&self, enabled: bool);

    fn show_code(&self, code: &str);

    /// Publish a debug image into `slot` (`0..IMAGE_SLOTS`)
    fn show_image(&self, slot: usize, image: &ImageSource);
}
