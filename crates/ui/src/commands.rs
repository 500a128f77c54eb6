//! Terminal front-end commands, shared by one-shot runs and the interactive shell.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use shopfront_catalog::{CartItemId, ProductId};

use crate::app::Storefront;
use crate::render;
use crate::toast::ToastKind;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List products, optionally filtered by name or description
    Products {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one product
    Show { id: ProductId },

    /// Create a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        stock: String,
    },

    /// Change a product; omitted fields keep their value
    Edit {
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },

    /// Delete a product
    Delete { id: ProductId },

    /// Put one unit of a product in the cart
    Buy { id: ProductId },

    /// Show the cart, or change it
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },

    /// Buy everything in the cart
    Checkout,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartAction {
    /// Add one unit to a cart line
    Inc { item: CartItemId },
    /// Take one unit off a cart line; the last unit removes it
    Dec { item: CartItemId },
    /// Drop a cart line
    Remove { item: CartItemId },
    /// Empty the cart
    Clear,
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "shopfront", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    #[command(flatten)]
    Run(Command),
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    /// Blocking alert raised by a product dialog.
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Outcome of a command: text for humans, data for `--json`, plus any
/// toast or alert the views raised while running it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub text: String,
    pub data: Value,
    pub notices: Vec<Notice>,
}

impl Report {
    fn new(text: String, data: Value) -> Self {
        Self {
            text,
            data,
            notices: Vec::new(),
        }
    }

    /// Whether a view reported a failure.
    pub fn failed(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n.kind, NoticeKind::Error | NoticeKind::Alert))
    }
}

/// Run `command` against the storefront and collect what the views showed.
pub async fn execute(shop: &mut Storefront, command: Command) -> Result<Report> {
    let mut report = run(shop, command).await?;
    report.notices = take_notices(shop);
    Ok(report)
}

async fn run(shop: &mut Storefront, command: Command) -> Result<Report> {
    match command {
        Command::Products { search } => {
            shop.products.set_search(search.unwrap_or_default());
            let visible = shop.products.visible_products();
            let widget = shop.products.cart_widget();
            let text = render::product_table(&visible, &widget);
            Ok(Report::new(text, json!({ "products": visible, "cart": widget })))
        }

        Command::Show { id } => {
            if !shop.products.open_details(id) {
                return Err(missing_product(shop, id));
            }
            let report = match shop.products.details_dialog.product() {
                Some(product) => Report::new(render::product_details(product), json!(product)),
                None => Report::default(),
            };
            shop.products.close_details();
            Ok(report)
        }

        Command::Add {
            name,
            description,
            price,
            stock,
        } => {
            let dialog = &mut shop.products.add_dialog;
            dialog.open();
            dialog.draft.name = name;
            dialog.draft.description = description;
            dialog.draft.price = price;
            dialog.draft.stock = stock;

            let created = shop.products.submit_add().await;
            // A one-shot command has no form to return to.
            shop.products.add_dialog.close();
            Ok(match created {
                Some(product) => Report::new(
                    format!("Added {} (#{})\n", product.name, product.id),
                    json!(product),
                ),
                None => Report::default(),
            })
        }

        Command::Edit {
            id,
            name,
            description,
            price,
            stock,
        } => {
            if !shop.products.open_edit(id) {
                return Err(missing_product(shop, id));
            }
            let draft = &mut shop.products.edit_dialog.draft;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(price) = price {
                draft.price = price;
            }
            if let Some(stock) = stock {
                draft.stock = stock;
            }

            let updated = shop.products.submit_edit().await;
            shop.products.edit_dialog.close();
            Ok(match updated {
                Some(product) => Report::new(render::product_details(&product), json!(product)),
                None => Report::default(),
            })
        }

        Command::Delete { id } => {
            if !shop.products.request_delete(id) {
                return Err(missing_product(shop, id));
            }
            let deleted = shop.products.confirm_delete().await;
            shop.products.delete_dialog.close();
            Ok(if deleted {
                Report::new(format!("Deleted product {id}\n"), json!({ "deleted": id }))
            } else {
                Report::default()
            })
        }

        Command::Buy { id } => {
            if shop.products.product(id).is_none() {
                return Err(missing_product(shop, id));
            }
            shop.products.add_to_cart(id).await;
            let widget = shop.products.cart_widget();
            Ok(Report::new(format!("{}\n", widget.label()), json!({ "cart": widget })))
        }

        Command::Cart { action } => {
            shop.open_cart().await;
            let applied = match action {
                Some(action) => apply_cart_action(shop, action).await,
                None => Ok(()),
            };
            shop.sync_cart_changes().await;
            let report = cart_report(shop);
            shop.close_cart();
            applied.map(|()| report)
        }

        Command::Checkout => {
            shop.open_cart().await;
            let receipt = shop.cart.checkout().await;
            shop.sync_cart_changes().await;
            shop.close_cart();
            Ok(match receipt {
                Some(receipt) => Report::new(render::receipt(&receipt), json!(receipt)),
                None => Report::default(),
            })
        }
    }
}

async fn apply_cart_action(shop: &mut Storefront, action: CartAction) -> Result<()> {
    let item = match action {
        CartAction::Inc { item } | CartAction::Dec { item } | CartAction::Remove { item } => item,
        CartAction::Clear => {
            shop.cart.clear().await;
            return Ok(());
        }
    };
    if shop.cart.item(item).is_none() {
        bail!("Cart item {item} not found");
    }
    match action {
        CartAction::Inc { .. } => shop.cart.increase(item).await,
        CartAction::Dec { .. } => shop.cart.decrease(item).await,
        _ => shop.cart.remove(item).await,
    };
    Ok(())
}

/// Error for an id absent from the listing. When the listing itself failed
/// to load, that failure is the one reported.
fn missing_product(shop: &Storefront, id: ProductId) -> anyhow::Error {
    match shop.products.load_error() {
        Some(err) => anyhow!("could not load products: {err}"),
        None => anyhow!("Product {id} not found"),
    }
}

fn cart_report(shop: &Storefront) -> Report {
    let items = shop.cart.items();
    let total = shop.cart.total();
    Report::new(
        render::cart_table(items, total),
        json!({ "items": items, "total": total }),
    )
}

/// Move the views' visible toasts and alert into notices, clearing them.
fn take_notices(shop: &mut Storefront) -> Vec<Notice> {
    let mut notices = Vec::new();
    if let Some(message) = shop.products.alert() {
        notices.push(Notice {
            kind: NoticeKind::Alert,
            message: message.to_string(),
        });
        shop.products.dismiss_alert();
    }
    for toast in [shop.products.toast(), shop.cart.toast()] {
        if let Some((kind, message)) = toast.current() {
            let kind = match kind {
                ToastKind::Success => NoticeKind::Success,
                ToastKind::Error => NoticeKind::Error,
            };
            notices.push(Notice {
                kind,
                message: message.to_string(),
            });
        }
    }
    shop.products.dismiss_toast();
    shop.cart.dismiss_toast();
    notices
}

/// Split a shell line into words. Single or double quotes group words;
/// a backslash escapes the next character.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                let escaped = chars.next().context("line ends with a dangling backslash")?;
                current.push(escaped);
                in_word = true;
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("unterminated {q} quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
