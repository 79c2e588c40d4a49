#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    List,
    Search,
    Add,
    Edit,
    BeginEdit,
    CancelEdit,
    SaveEdit,
    Remove,
    ThemeGet,
    ThemeToggle,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "entries.list" => Command::List,
            "entries.search" => Command::Search,
            "entries.add" => Command::Add,
            "entries.edit" => Command::Edit,
            "entries.edit.begin" => Command::BeginEdit,
            "entries.edit.cancel" => Command::CancelEdit,
            "entries.edit.save" => Command::SaveEdit,
            "entries.remove" => Command::Remove,
            "theme.get" => Command::ThemeGet,
            "theme.toggle" => Command::ThemeToggle,
            _ => Command::Unknown,
        }
    }
}
