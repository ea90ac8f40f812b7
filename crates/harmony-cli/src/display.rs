//! Plain-text rendering for predictions, note grids, and series output.

use harmony_ai::DualPrediction;
use harmony_core::{JournalNote, Metric, preview};
use harmony_store::SeriesPoint;

pub fn print_prediction(p: &DualPrediction) {
    if p.message.is_empty() {
        println!("No prediction (empty note).");
        return;
    }
    println!("Depression: {:.2}", p.depression);
    println!("Schizophrenia: {:.2}", p.schizophrenia);
    println!("{}", p.message);
}

pub fn print_notes(notes: &[JournalNote]) {
    if notes.is_empty() {
        println!("No notes available.");
        return;
    }
    for note in notes {
        println!("#{} {} ({})", note.id, note.title, note.date_time);
        println!("{}", preview(&note.body, 2));
        if !note.prediction_message.is_empty() {
            println!("{}", note.prediction_message);
        }
        println!();
    }
}

pub fn print_series(metric: Metric, points: &[SeriesPoint]) {
    if points.is_empty() {
        println!("No data available for {metric} analysis.");
        return;
    }
    println!("{metric} over time:");
    for point in points {
        println!("{}  {:.2}", point.at.format("%d %B %y, %H:%M"), point.score);
    }
}
