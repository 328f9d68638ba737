use migration::Migrator;

enum ActionEnum {
    Up,
    Down,
}

const CONFIG_ENV_PREFIX: &str = "MIGRATION";
const CONFIG_ENV_SEPARATOR: &str = "__";
const CONFIG: &str = "config";
const ACTION_KEY: &str = "migrate.action";
const ACTION_UP: &str = "up";
const ACTION_DOWN: &str = "down";
const DB_CON: &str = "migrate.dbcon";

#[tokio::main]
async fn main() {
    let config = match config::Config::builder()
        .add_source(
            config::File::with_name(CONFIG).required(false).format(config::FileFormat::Yaml),
        )
        .add_source(
            config::Environment::with_prefix(CONFIG_ENV_PREFIX).separator(CONFIG_ENV_SEPARATOR),
        )
        .build()
    {
        Ok(x) => x,
        Err(e) => return eprintln!("Cannot build config: {e}"),
    };
    let (action, db_con) = match (config.get_string(ACTION_KEY), config.get_string(DB_CON)) {
        (Ok(action), Ok(db_con)) => (action, db_con),
        (Err(e), _) | (_, Err(e)) => return eprintln!("Missing migration settings: {e}"),
    };
    let action = match action.as_str() {
        ACTION_UP => ActionEnum::Up,
        ACTION_DOWN => ActionEnum::Down,
        _ => {
            return eprintln!(
                "{} must be {} or {}, got {}",
                ACTION_KEY, ACTION_UP, ACTION_DOWN, action
            );
        }
    };
    let result = match action {
        ActionEnum::Up => Migrator::migration_up(&db_con).await,
        ActionEnum::Down => Migrator::migration_down(&db_con).await,
    };
    if let Err(e) = result {
        eprintln!("{e}");
    }
}
