//! The taco order form and its receipt.

use std::fmt;

use promptform::{
    Confirm, Form, FormError, Group, Input, MultiSelect, Note, Select, SelectOption, Slot, Text,
    new_options, validate_not_empty, validate_required,
};
use serde::Serialize;

use crate::config::{Config, OutputFormat};

const TOPPINGS: [&str; 6] = ["Lettuce", "Tomatoes", "Corn", "Salsa", "Sour Cream", "Cheese"];

/// Values bound to the order form.
///
/// Each slot is written when the matching field is confirmed.
#[derive(Clone)]
pub struct Order {
    shell: Slot<String>,
    base: Slot<String>,
    spice: Slot<u8>,
    toppings: Slot<Vec<String>>,
    name: Slot<String>,
    instructions: Slot<String>,
    discount: Slot<bool>,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Self {
            shell: Slot::new(String::new()),
            base: Slot::new(String::new()),
            spice: Slot::new(1),
            toppings: Slot::new(Vec::new()),
            name: Slot::new(String::new()),
            instructions: Slot::new(String::new()),
            discount: Slot::new(false),
        }
    }

    /// Builds the form that fills this order.
    pub fn form(&self, config: &Config) -> Form {
        let mut form = Form::new(vec![
            Group::new(vec![Box::new(
                Note::new()
                    .title("Taco Shop")
                    .description("Welcome to Taco Shop.\n\nHow may we take your order?")
                    .next(true)
                    .next_label("Let's go!"),
            )]),
            Group::new(vec![
                Box::new(
                    Select::new()
                        .title("Shell?")
                        .options(new_options(["Soft", "Hard"]))
                        .validate(|shell: &String| {
                            if shell == "Hard" {
                                Err(FormError::validation("we're out of hard shells, sorry"))
                            } else {
                                Ok(())
                            }
                        })
                        .bind(&self.shell),
                ),
                Box::new(
                    Select::new()
                        .title("Base?")
                        .options(new_options(["Chicken", "Beef", "Fish", "Beans"]))
                        .bind(&self.base),
                ),
                Box::new(
                    Select::new()
                        .title("Spice level")
                        .options(vec![
                            SelectOption::new("Mild", 1u8).selected(true),
                            SelectOption::new("Medium", 2),
                            SelectOption::new("Hot", 3),
                        ])
                        .inline(true)
                        .bind(&self.spice),
                ),
            ]),
            Group::new(vec![Box::new(
                MultiSelect::new()
                    .title("Toppings")
                    .description("Choose up to 4.")
                    .options(
                        TOPPINGS
                            .iter()
                            .enumerate()
                            .map(|(i, t)| SelectOption::new(*t, (*t).to_string()).selected(i < 2))
                            .collect(),
                    )
                    .limit(4)
                    .validate(validate_not_empty::<String>())
                    .bind(&self.toppings),
            )]),
            Group::new(vec![
                Box::new(
                    Input::new()
                        .title("What's your name?")
                        .placeholder("Margaret Thatcher")
                        .validate(validate_required("name"))
                        .bind(&self.name),
                ),
                Box::new(
                    Text::new()
                        .title("Special Instructions")
                        .placeholder("Just put it in the mailbox please")
                        .char_limit(400)
                        .lines(3)
                        .bind(&self.instructions),
                ),
                Box::new(
                    Confirm::new()
                        .title("Would you like 15% off?")
                        .affirmative("Yes!")
                        .negative("No.")
                        .bind(&self.discount),
                ),
            ]),
        ])
        .theme(config.theme())
        .editor(config.editor())
        .show_help(config.show_help);
        if let Some(width) = config.width {
            form = form.width(width);
        }
        form
    }

    /// Snapshot of the bound values.
    pub fn receipt(&self) -> Receipt {
        Receipt {
            shell: self.shell.get(),
            base: self.base.get(),
            spice: self.spice.get(),
            toppings: self.toppings.get(),
            name: self.name.get(),
            instructions: self.instructions.get(),
            discount: self.discount.get(),
        }
    }
}

/// A completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Shell type.
    pub shell: String,
    /// Filling.
    pub base: String,
    /// Spice level, 1 to 3.
    pub spice: u8,
    /// Chosen toppings in menu order.
    pub toppings: Vec<String>,
    /// Customer name.
    pub name: String,
    /// Free-form instructions.
    pub instructions: String,
    /// Whether the discount was accepted.
    pub discount: bool,
}

impl Receipt {
    /// Renders the receipt in the requested format.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spice = match self.spice {
            1 => "mild",
            2 => "medium",
            _ => "hot",
        };
        writeln!(f, "ORDER")?;
        writeln!(
            f,
            "One {} {} taco, {spice}, with {}.",
            self.shell.to_lowercase(),
            self.base.to_lowercase(),
            join_toppings(&self.toppings)
        )?;
        if !self.instructions.trim().is_empty() {
            writeln!(f, "Instructions: {}", self.instructions.trim())?;
        }
        if self.discount {
            writeln!(f, "Discount: 15% off")?;
        }
        write!(f, "Thanks for your order, {}!", self.name)
    }
}

fn join_toppings(toppings: &[String]) -> String {
    let lower: Vec<String> = toppings.iter().map(|t| t.to_lowercase()).collect();
    match lower.as_slice() {
        [] => "no toppings".to_string(),
        [one] => one.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}
