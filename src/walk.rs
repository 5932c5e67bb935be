use exif::{Context, Field, In};

use crate::error::ExtractError;

/// Outcome of visiting one tag entry during a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Keep walking.
    Continue,
    /// Abandon the remaining entries of the current directory only.
    SkipDirectory,
    /// Stop the whole walk; surfaces as a traversal error.
    Abort(String),
}

/// Visit every tag entry depth-first, directory by directory.
///
/// Entries are grouped into directories per IFD index, the root TIFF
/// directory first and its Exif/GPS/Interop sub-directories after, so a
/// visitor sees each directory as a contiguous run. `SkipDirectory` moves on
/// to the next directory; `Abort` stops everything and the walk returns an
/// error.
pub fn walk_fields<'a, I, F>(fields: I, mut visit: F) -> Result<(), ExtractError>
where
    I: IntoIterator<Item = &'a Field>,
    F: FnMut(&'a Field) -> VisitOutcome,
{
    let fields: Vec<&Field> = fields.into_iter().collect();

    // IFD indices in ascending order, primary image before thumbnail.
    let mut ifd_nums: Vec<In> = Vec::new();
    for field in &fields {
        if !ifd_nums.contains(&field.ifd_num) {
            ifd_nums.push(field.ifd_num);
        }
    }
    ifd_nums.sort_by_key(|ifd_num| ifd_num.index());

    for ifd_num in ifd_nums {
        for rank in 0..=DIRECTORY_RANKS {
            let directory: Vec<&Field> = fields
                .iter()
                .copied()
                .filter(|f| f.ifd_num == ifd_num && directory_rank(f.tag.context()) == rank)
                .collect();
            if directory.is_empty() {
                continue;
            }

            log::trace!(
                "walking directory of {} entries in {:?}",
                directory.len(),
                ifd_num
            );

            for field in directory {
                match visit(field) {
                    VisitOutcome::Continue => {}
                    VisitOutcome::SkipDirectory => break,
                    VisitOutcome::Abort(reason) => {
                        return Err(ExtractError::Traversal(reason));
                    }
                }
            }
        }
    }

    Ok(())
}

const DIRECTORY_RANKS: usize = 4;

fn directory_rank(context: Context) -> usize {
    match context {
        Context::Tiff => 0,
        Context::Exif => 1,
        Context::Gps => 2,
        Context::Interop => 3,
        _ => 4,
    }
}
