pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, phase, section, success, summary_row, timing, warn};
pub use progress::{Spinner, word_progress};
pub use table::{TableBuilder, stats_table};
pub use theme::{Theme, theme};
