/*!

This is the long-form manual for `county_results` and `countymap`.

## Input table

`countymap` reads the final table of the ingestion pipeline, one row per county
and election year, in CSV format with a header row. The following columns are used:

| column                               | type    | required |
|--------------------------------------|---------|----------|
| `county_fips`                        | string  | yes      |
| `county_name`                        | string  | no       |
| `state_name`                         | string  | yes      |
| `state_abbr`                         | string  | no       |
| `year`                               | integer | yes      |
| `votes_democrat`                     | integer | no (0)   |
| `votes_republican`                   | integer | no (0)   |
| `votes_other`                        | integer | no (0)   |
| `votes_total`                        | integer | no       |
| `votes_pct_two_party_democrat`       | float   | no       |
| `votes_pct_swing_from_prev_election` | float   | no       |

Other columns (population shares, income, poverty, education) are carried
through when present. FIPS codes are padded with zeros to 5 digits.

When the two-party share is missing, it is computed from the vote counts.
When the swing is missing, it is computed from the closest earlier election of
the same county in the table.

## Bins

Three binners are applied to every row:

* `margin_bin`: the two-party Democratic share, from `Rep > 60%` to `Dem > 60%`.
 A share of exactly 0.5 is `Rep < 1%`.
* `swing_bin`: the change of that share since the previous election, from
 `Rep swing > 20%` to `Dem swing > 20%`.
* `winning_margin_in_votes_bin`: Democratic minus Republican votes, from
 `Rep > 500k` to `Dem > 500k`.

Each bin covers the values in (lower, upper], the first bin also includes its
lower edge. A value sitting on an edge therefore gets the label of the bin below
it, so a swing of exactly 0 is `Rep swing < 1%`. Missing values and values
outside of the edges get no label and are drawn with the fallback colour `#cccccc`.

## Configuration

The bins can be changed with a JSON file passed with `--config`. All the sections are
optional:

```json
{
  "marginByShare": {
    "edges": [0.0, 0.45, 0.5, 0.55, 1.0],
    "labels": ["Rep > 10%", "Rep < 10%", "Dem < 10%", "Dem > 10%"],
    "colors": ["rgb(192,64,64)", "rgb(255,192,192)", "rgb(192,192,255)", "rgb(64,64,192)"]
  },
  "fallbackColor": "#dddddd"
}
```

The sections are `marginByShare`, `swingByShare` and `marginByVotes`. There must be one
more edge than labels, one colour per label, and the edges must be strictly increasing.
An invalid section stops the program before any row is processed.

## State summary

`--summary` with `--state` and `--year` prints the statewide totals:

```bash
countymap -i county_election_data_by_year.csv --state Georgia --year 2024 --summary
```

The output lists the winner first, then the runner-up, then the other candidates.
Only the Democratic and Republican candidates can win; a tie is counted as a
Republican win. When no vote was recorded, all the percentages are 0.

The summary can be checked against a reference JSON file with `--reference`.

*/
