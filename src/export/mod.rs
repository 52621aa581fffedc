//! Tabular output.
//!
//! Every collection step ends in a CSV file under the data directory. This
//! module owns the column layouts, the reader and writer, the file naming
//! scheme, and the pull request count distribution the dashboard charts.

mod files;
mod pr_count;
mod rows;
mod table;

pub use files::{DEFAULT_DATA_DIR, DataFiles};
pub use pr_count::pr_count_distribution;
pub use rows::{CommentRow, PrCountRow, PullRequestRow, TabularRow};
pub use table::{read_file, read_rows, write_file, write_rows};
