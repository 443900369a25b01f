//! Command registry - named command ownership and lookup

use crate::command::{Command, HelpCommand};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Registry slot holding an owned command.
///
/// Commands need `&mut self` to parse and run while the registry itself is
/// shared, so every slot gets its own `RefCell`.
pub type CommandCell = RefCell<Box<dyn Command>>;

/// Owns the registered commands, keyed by unique name.
///
/// Names are kept in a sorted map, so enumeration is alphabetical.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandCell>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a shared registry with the built-in `help` command registered.
    ///
    /// `help` keeps a weak handle to the registry under construction; `build`
    /// registers the host's own commands and receives the same handle for
    /// commands that need to look at their siblings. The returned registry is
    /// immutable.
    pub fn with_help<F>(build: F) -> Rc<CommandRegistry>
    where
        F: FnOnce(&mut CommandRegistry, &Weak<CommandRegistry>),
    {
        Rc::new_cyclic(|weak| {
            let mut registry = CommandRegistry::new();
            registry.add("help", Box::new(HelpCommand::new(weak.clone())));
            build(&mut registry, weak);
            registry
        })
    }

    /// Take ownership of `command` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered. Command sets are fixed when the
    /// program is written, so a duplicate is a wiring bug.
    pub fn add(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        assert!(
            !self.commands.contains_key(&name),
            "command '{}' is already registered",
            name
        );
        self.commands.insert(name, RefCell::new(command));
    }

    /// Register a default-constructed command of type `C`
    pub fn register<C>(&mut self, name: impl Into<String>)
    where
        C: Command + Default + 'static,
    {
        self.add(name, Box::new(C::default()));
    }

    /// Look up a command without taking ownership
    pub fn get(&self, name: &str) -> Option<&CommandCell> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Register a default-constructed command under a name.
///
/// ```
/// use vobla::command::{Command, CommandInfo, CommandRegistry, Context};
/// use vobla::{register_command, Status};
///
/// #[derive(Default)]
/// struct ListCommand {
///     info: CommandInfo,
/// }
///
/// impl Command for ListCommand {
///     fn info(&self) -> &CommandInfo { &self.info }
///     fn info_mut(&mut self) -> &mut CommandInfo { &mut self.info }
///     fn parse_args(&mut self, _args: &[String]) -> Status { Status::ok() }
///     fn run(&mut self, _ctx: &mut Context) -> Status { Status::ok() }
/// }
///
/// let mut registry = CommandRegistry::new();
/// register_command!(registry, "list", ListCommand);
/// assert_eq!(registry.names(), vec!["list"]);
/// ```
#[macro_export]
macro_rules! register_command {
    ($registry:expr, $name:expr, $cmd:ty) => {
        $registry.add($name, ::std::boxed::Box::new(<$cmd>::default()))
    };
}
