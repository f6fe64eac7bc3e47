//! Display text for roles and the console flow.
//!
//! Nothing in the dealing code knows about these strings; callers pass a
//! [`LabelTable`] to whatever renders output.
use crate::error::{Error, Result};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[default]
    Ru,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleText {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Console and file text other than role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiText {
    /// Between the player name and the role on a console line.
    pub separator: String,
    pub player_line: String,
    pub role_line: String,
    pub prompt_player_count: String,
    pub prompt_player_name: String,
    pub prompt_variant: String,
    pub variant_classic: String,
    pub variant_don: String,
    pub variant_extended: String,
    pub confirm_continue: String,
    pub files_written: String,
}

impl Default for UiText {
    fn default() -> Self {
        LabelTable::builtin(Language::En).ui
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelTable {
    pub roles: BTreeMap<Role, RoleText>,
    #[serde(default)]
    pub ui: UiText,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::builtin(Language::En)
    }
}

fn role_table(entries: [(Role, &str, &str); 6]) -> BTreeMap<Role, RoleText> {
    entries
        .into_iter()
        .map(|(role, name, description)| {
            let text = RoleText {
                name: name.to_string(),
                description: description.to_string(),
            };
            (role, text)
        })
        .collect()
}

impl LabelTable {
    pub fn builtin(language: Language) -> Self {
        match language {
            Language::Ru => Self {
                roles: role_table([
                    (Role::Mafia, "Мафия", "Ночью вместе с остальной мафией выбираете жертву. Цель: сравняться числом с мирными."),
                    (Role::Don, "Мафия (Дон)", "Глава мафии. Ночью принимаете окончательное решение о жертве и можете проверить, не детектив ли игрок."),
                    (Role::Detective, "Детектив", "Ночью проверяете одного игрока: принадлежит ли он к мафии."),
                    (Role::Doctor, "Доктор", "Ночью лечите одного игрока и спасаете его от выстрела."),
                    (Role::Maniac, "Маньяк", "Играете сами за себя. Каждую ночь выбираете, кого убить. Цель: остаться последним."),
                    (Role::Civilian, "Мирный", "Днём ищете мафию и голосуете. Побеждаете, когда мафии не осталось."),
                ]),
                ui: UiText {
                    separator: ": ".into(),
                    player_line: "Игрок".into(),
                    role_line: "Роль".into(),
                    prompt_player_count: "Введите количество игроков".into(),
                    prompt_player_name: "Игрок".into(),
                    prompt_variant: "Выберите режим игры".into(),
                    variant_classic: "Классический".into(),
                    variant_don: "С Доном".into(),
                    variant_extended: "Расширенный (с Маньяком)".into(),
                    confirm_continue: "Не удалось создать файл. Продолжить?".into(),
                    files_written: "Роли сохранены в папке".into(),
                },
            },
            Language::En => Self {
                roles: role_table([
                    (Role::Mafia, "Mafia", "At night you and the rest of the mafia pick a victim. Win by matching the civilians in number."),
                    (Role::Don, "Mafia (Don)", "Head of the mafia. You make the final call on the victim and may check whether a player is the detective."),
                    (Role::Detective, "Detective", "Each night you check one player for mafia membership."),
                    (Role::Doctor, "Doctor", "Each night you heal one player and save them from being shot."),
                    (Role::Maniac, "Maniac", "You play for yourself and kill one player each night. Be the last one standing."),
                    (Role::Civilian, "Civilian", "Find the mafia during the day and vote them out."),
                ]),
                ui: UiText {
                    separator: ": ".into(),
                    player_line: "Player".into(),
                    role_line: "Role".into(),
                    prompt_player_count: "Number of players".into(),
                    prompt_player_name: "Player".into(),
                    prompt_variant: "Game mode".into(),
                    variant_classic: "Classic".into(),
                    variant_don: "With Don".into(),
                    variant_extended: "Extended (with Maniac)".into(),
                    confirm_continue: "Could not create the file. Continue?".into(),
                    files_written: "Roles saved to".into(),
                },
            },
        }
    }

    /// Parse a table from JSON. Every role must be named; UI strings missing
    /// from the document fall back to the English table.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: LabelTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        match Role::ALL.into_iter().find(|r| !self.roles.contains_key(r)) {
            Some(missing) => Err(Error::MissingLabel(missing.key())),
            None => Ok(()),
        }
    }

    pub fn role(&self, role: Role) -> &str {
        self.roles.get(&role).map_or(role.key(), |t| t.name.as_str())
    }

    pub fn describe(&self, role: Role) -> &str {
        self.roles.get(&role).map_or("", |t| t.description.as_str())
    }
}
