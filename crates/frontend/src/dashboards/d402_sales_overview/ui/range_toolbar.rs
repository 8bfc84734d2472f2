use leptos::prelude::*;
use thaw::*;

const PRESETS: [(&str, &str); 3] = [("today", "Сегодня"), ("week", "Неделя"), ("month", "Месяц")];

/// Summary range selector: three preset buttons and a custom start/end pair
#[component]
pub fn RangeToolbar(
    /// Key of the highlighted preset; None for a custom range
    #[prop(into)]
    active_preset: Signal<Option<&'static str>>,
    /// Caption of the current summary range
    #[prop(into)]
    label: Signal<String>,
    on_preset: Callback<&'static str>,
    /// Start/end in yyyy-mm-dd, exactly as typed
    on_custom: Callback<(String, String)>,
) -> impl IntoView {
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());

    let on_apply = move |_| {
        on_custom.run((date_from.get_untracked(), date_to.get_untracked()));
    };

    view! {
        <Flex class="d402-range-toolbar" align=FlexAlign::Center gap=FlexGap::Small>
            <ButtonGroup>
                {PRESETS
                    .into_iter()
                    .map(|(key, title)| {
                        view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=move || {
                                    if active_preset.get() == Some(key) {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Subtle
                                    }
                                }
                                on_click=move |_| on_preset.run(key)
                            >
                                {title}
                            </Button>
                        }
                    })
                    .collect_view()}
            </ButtonGroup>

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    prop:value=date_from
                    on:input=move |ev| date_from.set(event_target_value(&ev))
                />
                <div>"—"</div>
                <input
                    type="date"
                    prop:value=date_to
                    on:input=move |ev| date_to.set(event_target_value(&ev))
                />
            </Flex>

            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || date_from.get().is_empty() || date_to.get().is_empty())
                on_click=on_apply
            >
                "Применить"
            </Button>

            <span class="d402-range-label">{label}</span>
        </Flex>
    }
}
