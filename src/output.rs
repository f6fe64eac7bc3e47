use crate::error::{Error, Result};
use crate::input::INVALID_NAME_CHARS;
use crate::labels::LabelTable;
use crate::types::{Assignment, PlayerName, Seat};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// `<name><separator><role>`
pub fn console_line(seat: &Seat, labels: &LabelTable) -> String {
    format!("{}{}{}", seat.player, labels.ui.separator, labels.role(seat.role))
}

pub fn file_body(seat: &Seat, labels: &LabelTable, describe: bool) -> String {
    let mut body = format!(
        "{}: {}\n{}: {}\n",
        labels.ui.player_line,
        seat.player,
        labels.ui.role_line,
        labels.role(seat.role)
    );
    let description = labels.describe(seat.role);
    if describe && !description.is_empty() {
        body.push('\n');
        body.push_str(description);
        body.push('\n');
    }
    body
}

/// Closing line once every file is on disk.
pub fn files_written_line(labels: &LabelTable, dir: &Path) -> String {
    format!("{} '{}'", labels.ui.files_written, dir.display())
}

/// File-system friendly form of a player name.
pub fn file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c.is_control() || INVALID_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// One path per seat. Stems that collide ignoring case get `_2`, `_3`, ...
pub fn plan_paths(assignment: &Assignment, dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut used = HashSet::with_capacity(assignment.len());
    assignment
        .iter()
        .map(|seat| {
            let stem = file_stem(&seat.player);
            let mut candidate = stem.clone();
            let mut n = 2;
            while !used.insert(candidate.to_lowercase()) {
                candidate = format!("{stem}_{n}");
                n += 1;
            }
            if candidate != stem {
                log::warn!("file name for '{}' taken, using '{candidate}'", seat.player);
            }
            match extension {
                "" => dir.join(candidate),
                ext => dir.join(format!("{candidate}.{ext}")),
            }
        })
        .collect()
}

/// What the caller wants after a player's file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PlayerName, Error)>,
    /// Set when the caller stopped the run after a failure.
    pub stopped: bool,
}

impl WriteSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && !self.stopped
    }
}

/// Writes one role file per player into a directory.
#[derive(Debug, Clone)]
pub struct RoleFileWriter {
    dir: PathBuf,
    extension: String,
    describe: bool,
}

impl RoleFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "txt".into(),
            describe: false,
        }
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn describe(mut self, describe: bool) -> Self {
        self.describe = describe;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write every seat's file. A failed file is handed to `on_failure`,
    /// which decides whether the remaining players still get theirs.
    ///
    /// Only a missing output directory that cannot be created fails the
    /// whole call.
    pub fn write_all<F>(
        &self,
        assignment: &Assignment,
        labels: &LabelTable,
        mut on_failure: F,
    ) -> Result<WriteSummary>
    where
        F: FnMut(&Seat, &Error) -> Flow,
    {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        let paths = plan_paths(assignment, &self.dir, &self.extension);
        let mut summary = WriteSummary::default();

        for (seat, path) in assignment.iter().zip(paths) {
            let body = file_body(seat, labels, self.describe);
            match std::fs::write(&path, body) {
                Ok(()) => {
                    log::debug!("wrote {}", path.display());
                    summary.written.push(path);
                }
                Err(source) => {
                    let err = Error::Io { path, source };
                    log::warn!("{err}");
                    let flow = on_failure(seat, &err);
                    summary.failed.push((seat.player.clone(), err));
                    if flow == Flow::Stop {
                        summary.stopped = true;
                        break;
                    }
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;
    use crate::labels::Language;
    use crate::types::Role;

    fn seat(player: &str, role: Role) -> Seat {
        Seat {
            player: player.into(),
            role,
        }
    }

    #[test]
    fn console_line_uses_table_separator() {
        let ru = LabelTable::builtin(Language::Ru);
        assert_eq!(console_line(&seat("Анна", Role::Mafia), &ru), "Анна: Мафия");

        let mut custom = LabelTable::builtin(Language::En);
        custom.ui.separator = " - ".into();
        assert_eq!(console_line(&seat("Bo", Role::Doctor), &custom), "Bo - Doctor");
    }

    #[test]
    fn body_has_player_and_role_lines() {
        let ru = LabelTable::builtin(Language::Ru);
        let body = file_body(&seat("Анна", Role::Detective), &ru, false);
        assert_eq!(body, "Игрок: Анна\nРоль: Детектив\n");
    }

    #[test]
    fn body_appends_description_on_request() {
        let en = LabelTable::builtin(Language::En);
        let body = file_body(&seat("Bo", Role::Civilian), &en, true);
        let lines: Vec<_> = body.lines().collect();
        assert_eq!(lines[0], "Player: Bo");
        assert_eq!(lines[1], "Role: Civilian");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], en.describe(Role::Civilian));
    }

    #[test]
    fn files_written_line_names_the_folder() {
        let ru = LabelTable::builtin(Language::Ru);
        assert_eq!(
            files_written_line(&ru, Path::new("roles")),
            "Роли сохранены в папке 'roles'"
        );
    }

    #[test]
    fn stems_replace_spaces_and_hostile_chars() {
        assert_eq!(file_stem("Chen Li"), "Chen_Li");
        assert_eq!(file_stem(" a:b*c "), "a_b_c");
        assert_eq!(file_stem("Анна"), "Анна");
        assert_eq!(file_stem("a\u{7}b"), "a_b");
    }

    #[test]
    fn colliding_stems_are_numbered() {
        let assignment = Assignment::new(vec![
            seat("Chen Li", Role::Mafia),
            seat("chen_li", Role::Civilian),
            seat("CHEN LI", Role::Doctor),
            seat("Bo", Role::Detective),
        ]);
        let paths = plan_paths(&assignment, Path::new("roles"), "txt");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("roles/Chen_Li.txt"),
                PathBuf::from("roles/chen_li_2.txt"),
                PathBuf::from("roles/CHEN_LI_3.txt"),
                PathBuf::from("roles/Bo.txt"),
            ]
        );
    }

    #[test]
    fn empty_extension_leaves_bare_stem() {
        let assignment = Assignment::new(vec![seat("Bo", Role::Mafia)]);
        let paths = plan_paths(&assignment, Path::new("out"), "");
        assert_eq!(paths, vec![PathBuf::from("out/Bo")]);
    }
}
