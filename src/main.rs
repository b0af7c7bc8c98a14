use log::debug;
use recipe_lookup::{App, Command, Outcome};
use std::env;

const USAGE: &str = "Usage:
  recipe-lookup search <query> [page]
  recipe-lookup show <id> [servings]
  recipe-lookup list <id>
  recipe-lookup like <id>
  recipe-lookup likes";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let action = args.first().ok_or(USAGE)?;
    let mut app = App::builder().build()?;

    match action.as_str() {
        "search" => {
            let query = args.get(1).ok_or(USAGE)?;
            let page = args.get(2).map(|p| p.parse::<usize>()).transpose()?.unwrap_or(1);
            app.handle(Command::Search {
                query: query.clone(),
            })
            .await?;
            print_outcome(&app.handle(Command::GoToPage { page }).await?);
        }
        "show" => {
            let id = args.get(1).ok_or(USAGE)?;
            let outcome = app.handle(Command::LoadRecipe { id: id.clone() }).await?;
            let target: Option<u32> = args.get(2).map(|s| s.parse::<u32>()).transpose()?;
            match target {
                Some(target) => {
                    let mut outcome = outcome;
                    while let Some(current) = current_servings(&app) {
                        let command = if current < target {
                            Command::IncreaseServings
                        } else if current > target && current > 1 {
                            Command::DecreaseServings
                        } else {
                            break;
                        };
                        outcome = app.handle(command).await?;
                    }
                    print_outcome(&outcome);
                }
                None => print_outcome(&outcome),
            }
        }
        "list" => {
            let id = args.get(1).ok_or(USAGE)?;
            app.handle(Command::LoadRecipe { id: id.clone() }).await?;
            print_outcome(&app.handle(Command::AddRecipeToList).await?);
        }
        "like" => {
            let id = args.get(1).ok_or(USAGE)?;
            app.handle(Command::LoadRecipe { id: id.clone() }).await?;
            print_outcome(&app.handle(Command::ToggleLike).await?);
        }
        "likes" => {
            let likes = &app.state().likes;
            if likes.count() == 0 {
                println!("No liked recipes yet.");
            }
            for like in likes.iter() {
                println!("{}  {} ({})", like.id, like.title, like.author);
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn current_servings(app: &App) -> Option<u32> {
    app.state().recipe.as_ref().map(|r| r.servings())
}

fn print_outcome(outcome: &Outcome) {
    debug!("{:#?}", outcome);
    match outcome {
        Outcome::Results {
            query,
            page,
            page_count,
            recipes,
        } => {
            println!("Results for {:?} (page {}/{}):", query, page, page_count);
            for recipe in recipes {
                println!("  {}  {} ({})", recipe.id, recipe.title, recipe.author);
            }
        }
        Outcome::Recipe { recipe, liked } => {
            println!("{}{}", recipe.title(), if *liked { " ♥" } else { "" });
            println!("by {} - {}", recipe.author(), recipe.url());
            println!(
                "{} minutes, {} servings",
                recipe.cooking_time(),
                recipe.servings()
            );
            for line in recipe.ingredients() {
                println!("  - {}", line);
            }
        }
        Outcome::Servings {
            servings,
            ingredients,
        } => {
            println!("{} servings", servings);
            for line in ingredients {
                println!("  - {}", line);
            }
        }
        Outcome::ListItems { added } => {
            for item in added {
                let line = recipe_lookup::IngredientLine {
                    count: item.count,
                    unit: item.unit.clone(),
                    ingredient: item.ingredient.clone(),
                };
                println!("  [{}] {}", item.id, line);
            }
        }
        Outcome::ListItemDeleted { id, removed } => {
            println!("{} {}", id, if *removed { "removed" } else { "not in list" });
        }
        Outcome::ListCountUpdated { id, count } => println!("{} -> {}", id, count),
        Outcome::Liked { liked, count } => {
            let verb = if *liked { "Liked" } else { "Unliked" };
            println!("{} ({} liked recipes)", verb, count);
        }
        Outcome::Ignored { reason } => println!("Nothing to do: {}", reason),
    }
}
