use subtrack::model::SubscriptionDraft;
use subtrack::sync::SubscriptionMutation;
use subtrack::view::{Feedback, SubscriptionsView};

use super::*;

pub(super) async fn handle_subs_command(home: &ClientHome, command: SubsCommands) -> Result<()> {
    match command {
        SubsCommands::List { sort, json } => {
            let mut view = load_view(home).await?;
            view.set_sort(sort);
            let sorted = view.sorted();
            if json {
                return print_json(&sorted, "subscriptions");
            }
            for sub in sorted {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    sub.service_name,
                    sub.plan_name,
                    money(sub.plan_price),
                    sub.person_count,
                    money(sub.monthly_share())
                );
            }
            Ok(())
        }
        SubsCommands::Add(args) => {
            let sub = draft(args).validate()?;
            mutate(home, SubscriptionMutation::Add(sub), "Subscription added").await
        }
        SubsCommands::Edit(args) => {
            let sub = draft(args).validate()?;
            mutate(home, SubscriptionMutation::Edit(sub), "Subscription updated").await
        }
        SubsCommands::Remove { service } => {
            let mutation = SubscriptionMutation::Remove {
                service_name: service,
            };
            mutate(home, mutation, "Subscription removed").await
        }
    }
}

pub(super) async fn handle_summary_command(home: &ClientHome, json: bool) -> Result<()> {
    let summary = load_view(home).await?.summary();
    if json {
        return print_json(&summary, "summary");
    }
    println!("subscriptions: {}", summary.count);
    println!("monthly: {}", money(summary.monthly_spend));
    println!("annual: {}", money(summary.annual_spend()));
    Ok(())
}

async fn load_view(home: &ClientHome) -> Result<SubscriptionsView> {
    let sync = home.coordinator()?;
    let mut view = SubscriptionsView::default();
    view.begin_load();
    view.apply(sync.load_user_subscriptions(&CancellationToken::new()).await);
    save_session(home, &sync)?;
    settled(view.state())?;
    Ok(view)
}

async fn mutate(home: &ClientHome, mutation: SubscriptionMutation, success: &str) -> Result<()> {
    let sync = home.coordinator()?;
    let result = sync.mutate_subscription(mutation).await;
    save_session(home, &sync)?;

    match Feedback::from_result(&result, success) {
        Feedback::Success(message) => {
            println!("{}", message);
            Ok(())
        }
        Feedback::Error(message) => Err(anyhow::anyhow!("{}", message)),
    }
}

fn draft(args: SubscriptionArgs) -> SubscriptionDraft {
    SubscriptionDraft {
        service_name: args.service,
        plan_name: args.plan,
        price: args.price,
        person_count: args.persons,
    }
}
