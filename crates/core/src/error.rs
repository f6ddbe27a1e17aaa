use std::fmt;

/// Why a grid configuration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    ZeroRows,
    ZeroColumns,
    ZeroMinGroupSize,
    PaletteTooSmall {
        palette_size: u8,
        min_group_size: usize,
    },
    ColorOutsidePalette,
}

/// Errors reported by the grid engine.
///
/// Both variants are caller mistakes and are raised before any cell changes.
/// An empty click or a too-small group is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    InvalidConfiguration(ConfigIssue),
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "out_of_bounds",
            GridError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "cell coordinate is outside the grid",
            GridError::InvalidConfiguration(issue) => match issue {
                ConfigIssue::ZeroRows => "grid needs at least one row",
                ConfigIssue::ZeroColumns => "grid needs at least one column",
                ConfigIssue::ZeroMinGroupSize => "minimum group size must be at least 1",
                ConfigIssue::PaletteTooSmall { .. } => {
                    "palette must have at least as many colors as the minimum group size"
                }
                ConfigIssue::ColorOutsidePalette => "grid holds a color outside the palette",
            },
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GridError::OutOfBounds {
                row,
                col,
                rows,
                columns,
            } => write!(
                f,
                "{}: ({row}, {col}) not in {rows}x{columns}",
                self.message()
            ),
            GridError::InvalidConfiguration(ConfigIssue::PaletteTooSmall {
                palette_size,
                min_group_size,
            }) => write!(
                f,
                "{} (palette {palette_size}, min group {min_group_size})",
                self.message()
            ),
            GridError::InvalidConfiguration(_) => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for GridError {}
