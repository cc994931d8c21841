use crate::commands::registry::{
    CommandArgs, CommandContext, CommandRegistry, CommandSpec, ParamSpec,
};
use base::entities::NewOrder;
use base::stores::OrderStore;
use base::OrderBotResult;

pub const NO_ORDERS_REPLY: &str = "目前沒有訂單。";

/// Builds a registry holding `help` and the three order commands.
pub fn order_command_registry<S: OrderStore>() -> OrderBotResult<CommandRegistry<S>> {
    let mut registry = CommandRegistry::new();

    registry.register(CommandSpec {
        name: "add_order",
        description: "新增訂單",
        params: vec![
            ParamSpec::text("order_id"),
            ParamSpec::text("product"),
            ParamSpec::integer("quantity"),
        ],
        handler: add_order::<S>,
    })?;

    registry.register(CommandSpec {
        name: "list_orders",
        description: "列出所有訂單",
        params: vec![],
        handler: list_orders::<S>,
    })?;

    registry.register(CommandSpec {
        name: "delete_order",
        description: "刪除指定ID的所有訂單",
        params: vec![ParamSpec::text("order_id")],
        handler: delete_order::<S>,
    })?;

    registry.register(CommandSpec {
        name: "help",
        description: "顯示可用指令",
        params: vec![],
        handler: help::<S>,
    })?;

    Ok(registry)
}

pub fn add_order<S: OrderStore>(
    ctx: &CommandContext<'_, S>,
    args: &CommandArgs,
) -> OrderBotResult<String> {
    let new_order = NewOrder {
        order_id: args.text("order_id")?.to_string(),
        product: args.text("product")?.to_string(),
        quantity: args.integer("quantity")?,
    };

    let order = ctx
        .order_book
        .add_order(new_order.placed_by(&ctx.author.display_name))?;

    Ok(format!(
        "訂單已添加：\n訂單ID: {}\n用戶: {}\n產品: {}\n數量: {}",
        order.order_id, order.user, order.product, order.quantity
    ))
}

pub fn list_orders<S: OrderStore>(
    ctx: &CommandContext<'_, S>,
    _args: &CommandArgs,
) -> OrderBotResult<String> {
    let orders = ctx.order_book.list_orders()?;

    if orders.is_empty() {
        return Ok(NO_ORDERS_REPLY.to_string());
    }

    Ok(orders
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn delete_order<S: OrderStore>(
    ctx: &CommandContext<'_, S>,
    args: &CommandArgs,
) -> OrderBotResult<String> {
    let order_id = args.text("order_id")?;

    let number_of_removed_orders = ctx.order_book.delete_order(order_id)?;
    log::info!(
        "{} removed {} orders with an id {}",
        ctx.author.display_name,
        number_of_removed_orders,
        order_id
    );

    Ok(format!("訂單ID: {} 已刪除（如果存在）。", order_id))
}

pub fn help<S: OrderStore>(
    ctx: &CommandContext<'_, S>,
    _args: &CommandArgs,
) -> OrderBotResult<String> {
    let lines = ctx
        .registry
        .commands()
        .iter()
        .map(|command| format!("{}：{}", command.usage(ctx.prefix), command.description))
        .collect::<Vec<_>>();

    Ok(format!("可用指令：\n{}", lines.join("\n")))
}
