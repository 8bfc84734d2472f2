use crate::dashboards::d402_sales_overview::render::TopItemsList;
use crate::shared::date_utils::format_short_range;
use crate::shared::number_format::{format_count, format_money};
use leptos::prelude::*;

/// Best sellers of the chart period
#[component]
pub fn TopItemsTable(#[prop(into)] list: Signal<Option<TopItemsList>>) -> impl IntoView {
    let caption = move || {
        list.get()
            .map(|l| format!("Топ товаров за {}", format_short_range(&l.range)))
            .unwrap_or_else(|| "Топ товаров".to_string())
    };

    let rows = move || {
        let Some(list) = list.get() else {
            return view! { <></> }.into_any();
        };
        if list.items.is_empty() {
            return view! {
                <tr>
                    <td colspan="4" class="d402-top-items__empty">"Нет продаж за период"</td>
                </tr>
            }
            .into_any();
        }
        list.items
            .into_iter()
            .map(|item| {
                view! {
                    <tr>
                        <td>{item.rank}</td>
                        <td>{item.name}</td>
                        <td class="text-right">{format_count(item.quantity)}</td>
                        <td class="text-right">{format_money(item.sales)}</td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="d402-top-items">
            <h3>{caption}</h3>
            <table class="table__data">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Товар"</th>
                        <th class="text-right">"Кол-во"</th>
                        <th class="text-right">"Сумма"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}
