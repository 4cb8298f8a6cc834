//! The two prompt groups and the step between them.
//!
//! Group one asks for the bot token. The token is used to log in and list
//! the bot's servers, then group two asks for everything else: the server,
//! a text channel and admin roles of that server, the numeric settings and
//! a final confirmation. Channel and role pickers follow the server picker
//! through an [`OptionResolver`].

use std::collections::HashMap;

use setup_form::{
    AnswerValue, Answers, Choice, ConfirmField, Field, FieldKind, FieldPath, FormBackend,
    FormDefinition, FormError, InputField, MultiSelectField, OptionProvider, OptionResolver,
    SelectField, StaticOptions, ToggleField, fill,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::discord::{Channel, ChatPlatform, DiscordClient, Guild, Role};
use crate::error::SetupError;
use crate::validate;

/// How many servers are listed in the server picker.
pub const GUILD_LIST_LIMIT: usize = 200;

pub const DISCORD_TOKEN: &str = "discordToken";
pub const GUILD_ID: &str = "guildId";
pub const CHANNEL_ID: &str = "channelId";
pub const ADMIN_ROLES: &str = "adminRoles";
pub const PLAYBACK_TIMEOUT: &str = "playbackTimeout";
pub const SCREEN_NUMBER: &str = "screenNumber";
pub const USER_LIMIT: &str = "userLimit";
pub const ALLOW_SELF_SWAP: &str = "allowSelfSwap";
pub const CONFIRM: &str = "confirm";

/// Result of a completed wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operator confirmed; the record holds the new values.
    Save(Config),
    /// The operator declined to save.
    Discarded,
}

/// Group one: the bot token, pre-filled with the current one.
pub fn token_form(config: &Config) -> FormDefinition {
    FormDefinition::new(vec![
        Field::new(
            DISCORD_TOKEN,
            "Discord Token",
            FieldKind::Input(InputField::with_default(&config.discord_token).allowing_empty()),
        )
        .with_description(
            "Enter your Discord bot token. If you haven't created a bot yet, see the README for instructions.",
        ),
    ])
}

/// Group two: server, channel, roles, the numeric and yes/no settings, and
/// the save confirmation.
pub fn settings_form(config: &Config, guilds: &[Guild]) -> FormDefinition {
    let guild_choices = guilds
        .iter()
        .map(|guild| Choice::new(&guild.name, &guild.id))
        .collect();

    FormDefinition::new(vec![
        Field::new(
            GUILD_ID,
            "Guild",
            FieldKind::Select(SelectField::new(guild_choices).with_default(&config.guild_id)),
        )
        .with_description("Select the guild the bot will be used in."),
        Field::new(
            CHANNEL_ID,
            "Channel",
            FieldKind::Select(SelectField::dependent(GUILD_ID).with_default(&config.channel_id)),
        )
        .with_description("Select the channel the bot will be used in."),
        Field::new(
            ADMIN_ROLES,
            "Admin Roles",
            FieldKind::MultiSelect(
                MultiSelectField::dependent(GUILD_ID).with_defaults(config.admin_roles.clone()),
            ),
        )
        .with_description("Select the roles that can manage the bot."),
        Field::new(
            PLAYBACK_TIMEOUT,
            "Playback Timeout",
            FieldKind::Input(InputField::with_default(config.playback_timeout.to_string())),
        )
        .with_description(
            "The time in seconds before the bot automatically begins playing the next song.",
        ),
        Field::new(
            SCREEN_NUMBER,
            "Screen Number",
            FieldKind::Input(InputField::with_default(config.screen_number.to_string())),
        )
        .with_description("The screen number to display the video on (0 for primary)."),
        Field::new(
            USER_LIMIT,
            "User Limit",
            FieldKind::Input(InputField::with_default(config.user_limit.to_string())),
        )
        .with_description("The maximum number of songs a user can queue at once."),
        Field::new(
            ALLOW_SELF_SWAP,
            "Allow Self Swap",
            FieldKind::Toggle(ToggleField::new(config.allow_self_swap)),
        )
        .with_description("Allow users to swap their own songs."),
        Field::new(
            CONFIRM,
            "Save this configuration?",
            FieldKind::Confirm(ConfirmField::new()),
        ),
    ])
}

/// Validator for group two: the numeric fields must hold integers.
pub fn check_field(path: &FieldPath, value: &AnswerValue, _: &Answers) -> Result<(), String> {
    match path.as_str() {
        PLAYBACK_TIMEOUT | SCREEN_NUMBER | USER_LIMIT => {
            value.as_str().map_or(Ok(()), validate::is_int)
        }
        _ => Ok(()),
    }
}

fn accept_any(_: &FieldPath, _: &AnswerValue, _: &Answers) -> Result<(), String> {
    Ok(())
}

/// Text channels of a server as picker options.
///
/// Channels whose name is shared with another text channel are labelled
/// `name (id)`.
pub fn channel_choices(channels: &[Channel]) -> Vec<Choice> {
    let text: Vec<&Channel> = channels.iter().filter(|c| c.is_text()).collect();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for channel in &text {
        *seen.entry(channel.name.as_str()).or_default() += 1;
    }

    text.into_iter()
        .map(|channel| {
            let label = if seen[channel.name.as_str()] > 1 {
                format!("{} ({})", channel.name, channel.id)
            } else {
                channel.name.clone()
            };
            Choice::new(label, &channel.id)
        })
        .collect()
}

pub fn role_choices(roles: &[Role]) -> Vec<Choice> {
    roles
        .iter()
        .map(|role| Choice::new(&role.name, &role.id))
        .collect()
}

/// Looks up channel and role options for the selected server.
pub struct GuildOptions<P> {
    platform: P,
}

impl<P: ChatPlatform> GuildOptions<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }
}

impl<P: ChatPlatform> OptionProvider for GuildOptions<P> {
    fn provide(&self, field: &FieldPath, guild_id: &str) -> anyhow::Result<Vec<Choice>> {
        match field.as_str() {
            CHANNEL_ID => Ok(channel_choices(&self.platform.guild_channels(guild_id)?)),
            ADMIN_ROLES => Ok(role_choices(&self.platform.guild_roles(guild_id)?)),
            other => anyhow::bail!("no options are known for '{other}'"),
        }
    }
}

/// Log in with `token` and list the bot's servers.
pub fn discord_login(token: &str) -> Result<(DiscordClient, Vec<Guild>), SetupError> {
    let client = DiscordClient::new(token)?;
    let guilds = client.user_guilds(GUILD_LIST_LIMIT)?;
    Ok((client, guilds))
}

/// Run both prompt groups against `config`.
///
/// `login` turns the entered token into a platform client and the list of
/// servers. An empty list ends the run with [`SetupError::NoGuilds`] before
/// group two is shown.
pub fn run<B, P, L>(backend: &B, mut config: Config, login: L) -> Result<Outcome, SetupError>
where
    B: FormBackend,
    P: ChatPlatform,
    L: FnOnce(&str) -> Result<(P, Vec<Guild>), SetupError>,
{
    let answers = fill(backend, &token_form(&config), &StaticOptions, &accept_any)?;
    config.discord_token = answers
        .get_string(&FieldPath::new(DISCORD_TOKEN))
        .map_err(FormError::backend)?
        .to_string();

    let (platform, guilds) = login(&config.discord_token)?;
    if guilds.is_empty() {
        return Err(SetupError::NoGuilds);
    }
    debug!(count = guilds.len(), "listed servers");

    let resolver = OptionResolver::new(GuildOptions::new(platform));
    let answers = fill(
        backend,
        &settings_form(&config, &guilds),
        &resolver,
        &check_field,
    )?;

    apply(config, &answers)
}

/// Free text or a single choice.
fn text(answers: &Answers, name: &str) -> Result<String, SetupError> {
    let value = answers
        .get(&FieldPath::new(name))
        .and_then(AnswerValue::as_str)
        .ok_or_else(|| FormError::backend(anyhow::anyhow!("no answer for '{name}'")))?;
    Ok(value.to_string())
}

fn flag(answers: &Answers, name: &str) -> Result<bool, SetupError> {
    let value = answers
        .get_bool(&FieldPath::new(name))
        .map_err(FormError::backend)?;
    Ok(value)
}

/// Copy group two's answers into `config`.
///
/// Returns [`Outcome::Discarded`] without touching the record when the
/// confirmation was declined.
pub fn apply(mut config: Config, answers: &Answers) -> Result<Outcome, SetupError> {
    if !flag(answers, CONFIRM)? {
        info!("configuration discarded");
        return Ok(Outcome::Discarded);
    }

    config.guild_id = text(answers, GUILD_ID)?;
    config.channel_id = text(answers, CHANNEL_ID)?;
    config.admin_roles = answers
        .get_choices(&FieldPath::new(ADMIN_ROLES))
        .map_err(FormError::backend)?
        .to_vec();
    config.playback_timeout = validate::parse_or_zero(&text(answers, PLAYBACK_TIMEOUT)?);
    config.screen_number = validate::parse_or_zero(&text(answers, SCREEN_NUMBER)?);
    config.user_limit = validate::parse_or_zero(&text(answers, USER_LIMIT)?);
    config.allow_self_swap = flag(answers, ALLOW_SELF_SWAP)?;

    Ok(Outcome::Save(config))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn channel(id: &str, name: &str, kind: u8) -> Channel {
        Channel {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    #[test]
    fn duplicate_channel_names_carry_ids() {
        let channels = vec![
            channel("1", "general", 0),
            channel("2", "general", 0),
            channel("3", "memes", 0),
        ];

        assert_eq!(
            channel_choices(&channels),
            vec![
                Choice::new("general (1)", "1"),
                Choice::new("general (2)", "2"),
                Choice::new("memes", "3"),
            ]
        );
    }

    #[test]
    fn only_text_channels_are_offered() {
        let channels = vec![
            channel("1", "general", 0),
            channel("2", "general", 2),
            channel("3", "Category", 4),
        ];

        // The voice channel does not make the name ambiguous.
        assert_eq!(channel_choices(&channels), vec![Choice::new("general", "1")]);
    }

    #[test]
    fn numeric_fields_are_validated() {
        let answers = Answers::new();
        let timeout = FieldPath::new(PLAYBACK_TIMEOUT);

        assert!(check_field(&timeout, &"45".into(), &answers).is_ok());
        assert_eq!(
            check_field(&timeout, &"soon".into(), &answers),
            Err("must be a number".to_string())
        );
        assert!(check_field(&FieldPath::new(GUILD_ID), &AnswerValue::Choice("x".into()), &answers).is_ok());
    }

    #[test]
    fn settings_form_prefills_current_values() {
        let config = Config {
            guild_id: "g".into(),
            admin_roles: vec!["r".into()],
            allow_self_swap: true,
            ..Config::first_run()
        };
        let form = settings_form(&config, &[]);

        let timeout = form.field(&FieldPath::new(PLAYBACK_TIMEOUT)).unwrap();
        assert!(matches!(timeout.kind(), FieldKind::Input(input) if input.default.as_deref() == Some("45")));

        let roles = form.field(&FieldPath::new(ADMIN_ROLES)).unwrap();
        assert!(matches!(roles.kind(), FieldKind::MultiSelect(multi) if multi.defaults == vec!["r".to_string()]));

        let swap = form.field(&FieldPath::new(ALLOW_SELF_SWAP)).unwrap();
        assert!(matches!(swap.kind(), FieldKind::Toggle(toggle) if toggle.default));

        let dependents: Vec<&str> = form
            .dependents_of(&FieldPath::new(GUILD_ID))
            .map(|field| field.path().as_str())
            .collect();
        assert_eq!(dependents, vec![CHANNEL_ID, ADMIN_ROLES]);
    }

    #[test]
    fn declined_confirmation_discards() {
        let mut answers = Answers::new();
        answers.insert(CONFIRM, false);

        let outcome = apply(Config::first_run(), &answers).unwrap();
        assert_eq!(outcome, Outcome::Discarded);
    }

    #[test]
    fn apply_parses_numbers() {
        let mut answers = Answers::new();
        answers.insert(CONFIRM, true);
        answers.insert(GUILD_ID, AnswerValue::Choice("g".into()));
        answers.insert(CHANNEL_ID, AnswerValue::Choice("c".into()));
        answers.insert(ADMIN_ROLES, vec!["r1".to_string(), "r2".to_string()]);
        answers.insert(PLAYBACK_TIMEOUT, "30");
        answers.insert(SCREEN_NUMBER, "1");
        answers.insert(USER_LIMIT, "x");
        answers.insert(ALLOW_SELF_SWAP, true);

        let Outcome::Save(config) = apply(Config::first_run(), &answers).unwrap() else {
            panic!("expected a save");
        };
        assert_eq!(config.guild_id, "g");
        assert_eq!(config.channel_id, "c");
        assert_eq!(config.admin_roles, vec!["r1", "r2"]);
        assert_eq!(config.playback_timeout, 30);
        assert_eq!(config.screen_number, 1);
        assert_eq!(config.user_limit, 0);
        assert!(config.allow_self_swap);
    }

    #[test]
    fn apply_reports_missing_answers() {
        let mut answers = Answers::new();
        answers.insert(CONFIRM, true);
        answers.insert(GUILD_ID, AnswerValue::Choice("g".into()));

        let err = apply(Config::first_run(), &answers).unwrap_err();
        assert!(matches!(err, SetupError::Form(_)));
        assert!(err.to_string().contains("no answer for 'channelId'"));
    }
}
