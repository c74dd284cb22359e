use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;

use crate::session::SessionError;

/// Loads the ordered cutout manifest: one item path per line.
///
/// Line terminators are stripped; blank lines are not filtered.
pub fn load_manifest(path: &Path) -> Result<Vec<String>, SessionError> {
    if !path.exists() {
        return Err(SessionError::NotFound {
            what: "cutout manifest",
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Returns the items from `worklist` whose ids are not in `done`.
///
/// Manifest order is preserved deterministically; the pending set is a filtered
/// view of the work list, not an unordered set difference. With an empty `done`
/// set (fresh session) the work list comes back unchanged.
pub fn pending_items(worklist: &[String], done: &HashSet<String>) -> Vec<String> {
    worklist
        .iter()
        .filter(|id| !done.contains(*id))
        .cloned()
        .collect()
}

/// Shuffles the pending items in place. Classification runs are shuffled;
/// training runs keep file order and never call this.
pub fn shuffle(items: &mut [String]) {
    let mut rng = rand::rng();
    items.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn manifest_round_trip() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cutoutlist.dat");
        fs::write(&path, "cutouts/a.fits\ncutouts/b.fits\n").unwrap();

        let items = load_manifest(&path)?;
        assert_eq!(items, ["cutouts/a.fits", "cutouts/b.fits"]);
        Ok(())
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_manifest(&dir.path().join("cutoutlist.dat"));
        assert!(matches!(result, Err(SessionError::NotFound { .. })));
    }

    #[test]
    fn blank_lines_are_kept() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cutoutlist.dat");
        fs::write(&path, "a.fits\n\nb.fits\n").unwrap();

        let items = load_manifest(&path)?;
        assert_eq!(items, ["a.fits", "", "b.fits"]);
        Ok(())
    }

    #[test]
    fn pending_preserves_manifest_order() {
        let worklist: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let done: HashSet<String> = ["b", "d"].iter().map(|s| s.to_string()).collect();

        let pending = pending_items(&worklist, &done);
        assert_eq!(pending, ["a", "c", "e"]);
    }

    #[test]
    fn fresh_session_returns_worklist_unchanged() {
        let worklist: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let pending = pending_items(&worklist, &HashSet::new());
        assert_eq!(pending, worklist);
    }

    #[test]
    fn done_items_are_never_reoffered() {
        let worklist: Vec<String> = (0..50).map(|i| format!("cutout-{i}.fits")).collect();
        let done: HashSet<String> = worklist.iter().take(20).cloned().collect();

        let pending = pending_items(&worklist, &done);
        assert_eq!(pending.len(), 30);
        assert!(pending.iter().all(|id| !done.contains(id)));
    }

    #[test]
    fn shuffle_keeps_the_same_items() {
        let mut items: Vec<String> = (0..100).map(|i| format!("cutout-{i}.fits")).collect();
        let original = items.clone();

        shuffle(&mut items);
        assert_eq!(items.len(), original.len());
        let mut sorted = items.clone();
        sorted.sort();
        let mut expected = original;
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
