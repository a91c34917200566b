use super::*;
use platform_host::format_clock_hh_mm;

fn snapshot_count_label(count: usize) -> String {
    format!("{count} Snapshots")
}

/// Label for the selected history entry; `None` until the slider has been moved.
fn restored_label(timestamps: &[u64], selected: Option<usize>) -> Option<String> {
    let ts = timestamps.get(selected?)?;
    Some(format!("Restored to: {}", format_clock_hh_mm(*ts)))
}

#[component]
pub(super) fn TimeMachinePanel() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let history = use_history();
    let panel_open = create_rw_signal(false);
    let selected = create_rw_signal(None::<usize>);

    let snapshot_count = move || history.with(Vec::len);
    let has_snapshots = move || snapshot_count() != 0;
    let slider_max = move || snapshot_count().saturating_sub(1).to_string();
    let slider_value = move || {
        selected
            .get()
            .unwrap_or_else(|| snapshot_count().saturating_sub(1))
            .to_string()
    };
    let restored = move || history.with(|timestamps| restored_label(timestamps, selected.get()));

    let on_scrub = move |ev: web_sys::Event| {
        let Ok(index) = event_target_value(&ev).parse::<usize>() else {
            return;
        };
        selected.set(Some(index));
        runtime.transition(move |store| store.restore_snapshot(index));
    };

    view! {
        <Show when=has_snapshots fallback=|| ()>
            <div class="time-machine">
                <button
                    type="button"
                    class="time-machine-toggle"
                    aria-expanded=move || panel_open.get()
                    aria-controls="time-machine-panel"
                    on:click=move |_| panel_open.update(|open| *open = !*open)
                >
                    {move || snapshot_count_label(snapshot_count())}
                </button>
                <Show when=move || panel_open.get() fallback=|| ()>
                    <div id="time-machine-panel" class="time-machine-panel" role="group" aria-label="Time machine">
                        <input
                            type="range"
                            class="time-machine-slider"
                            min="0"
                            max=slider_max
                            step="1"
                            prop:value=slider_value
                            aria-label="Snapshot"
                            on:input=on_scrub
                        />
                        <span class="time-machine-label">{restored}</span>
                    </div>
                </Show>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn restored_label_needs_a_selection_inside_history() {
        let timestamps = [0, (13 * 60 + 7) * 60_000];

        assert_eq!(restored_label(&timestamps, None), None);
        assert_eq!(restored_label(&timestamps, Some(2)), None);
        assert_eq!(
            restored_label(&timestamps, Some(1)).as_deref(),
            Some("Restored to: 13:07")
        );
    }

    #[test]
    fn count_label_matches_history_length() {
        assert_eq!(snapshot_count_label(12), "12 Snapshots");
    }
}
